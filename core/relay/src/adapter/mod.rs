pub(crate) mod config;
pub(crate) mod llm_transform;
pub(crate) mod llm_transform_factory;
pub(crate) mod map_env_resolver;
pub(crate) mod stub_transform;

pub(crate) use config::resolve_config;
pub(crate) use llm_transform_factory::StdTransformFactory;
#[cfg(test)]
pub(crate) use map_env_resolver::MapEnvResolver;
#[cfg(test)]
pub(crate) use stub_transform::StubTransformFactory;
