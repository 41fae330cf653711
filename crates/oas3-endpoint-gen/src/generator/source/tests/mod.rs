mod routes;

fn load(spec_json: &str) -> oas3::Spec {
  oas3::from_json(spec_json).unwrap()
}

fn mapper(spec: &oas3::Spec) -> super::TypeMapper {
  super::TypeMapper::new(spec.components.iter().flat_map(|c| c.schemas.keys()))
}
