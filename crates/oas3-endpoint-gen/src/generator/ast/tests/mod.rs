mod content_category;
mod parsed_path;
mod status_codes;
