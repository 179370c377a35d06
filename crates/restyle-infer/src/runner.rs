use crate::{BackendRegistry, InferError, Session, resolve_model};
use restyle_base::Tensor;
use std::collections::HashMap;
use std::path::Path;

/// A session together with the name of the backend that loaded it.
pub struct Runner {
    backend_name: String,
    session: Box<dyn Session>,
}

impl std::fmt::Debug for Runner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runner")
            .field("backend_name", &self.backend_name)
            .field("inputs", &self.session.input_names())
            .field("outputs", &self.session.output_names())
            .finish()
    }
}

impl Runner {
    pub fn new(backend_name: impl Into<String>, session: Box<dyn Session>) -> Self {
        Self {
            backend_name: backend_name.into(),
            session,
        }
    }

    pub fn backend_name(&self) -> &str {
        &self.backend_name
    }

    pub fn input_names(&self) -> &[String] {
        self.session.input_names()
    }

    pub fn output_names(&self) -> &[String] {
        self.session.output_names()
    }

    pub fn run(
        &mut self,
        inputs: &[(&str, Tensor<f32>)],
    ) -> Result<HashMap<String, Tensor<f32>>, InferError> {
        self.session.run(inputs)
    }
}

/// Load the model at `path` on the first backend that accepts it.
///
/// Backends are tried in the descriptor's order, or in registry order when
/// the path names a bare model file. Unknown backend names are skipped. If
/// every backend fails, the last failure is returned.
pub fn load_runner(path: &Path, registry: &BackendRegistry) -> Result<Runner, InferError> {
    let (source, preferred) = resolve_model(path)?;
    let order: Vec<String> = if preferred.is_empty() {
        registry.list().into_iter().map(String::from).collect()
    } else {
        preferred
    };

    let mut last_error = None;
    for name in &order {
        let Some(backend) = registry.get(name) else {
            log::warn!("backend '{}' is not available, skipping", name);
            continue;
        };
        match backend.load_model(source.clone()) {
            Ok(session) => {
                log::info!("model {} loaded on backend '{}'", path.display(), name);
                return Ok(Runner::new(name.clone(), session));
            }
            Err(e) => {
                log::warn!("backend '{}' failed to load model: {}", name, e);
                last_error = Some(e);
            }
        }
    }

    Err(last_error.unwrap_or_else(|| {
        InferError::BackendError(format!("no usable backend among {:?}", order))
    }))
}
