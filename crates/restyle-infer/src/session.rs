use crate::InferError;
use restyle_base::Tensor;
use std::collections::HashMap;

/// A loaded model ready to execute.
pub trait Session {
    /// Run the model on named inputs, returning every output by name.
    fn run(
        &mut self,
        inputs: &[(&str, Tensor<f32>)],
    ) -> Result<HashMap<String, Tensor<f32>>, InferError>;
    fn input_names(&self) -> &[String];
    fn output_names(&self) -> &[String];
}
