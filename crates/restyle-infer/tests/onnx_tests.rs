use restyle_base::Tensor;
use restyle_infer::backends::OnnxBackend;
use restyle_infer::backends::onnx::{ndarray_to_tensor, tensor_to_ndarray};
use restyle_infer::{Backend, Device, InferError, ModelSource, create_registry};

#[test]
fn test_onnx_backend_name() {
    let backend = OnnxBackend::new(Device::Cpu);
    assert_eq!(backend.name(), "onnx");
    assert_eq!(backend.device(), &Device::Cpu);
}

#[test]
fn test_tensor_to_ndarray_conversion() {
    let tensor = Tensor::new(vec![2, 3], vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    let array = tensor_to_ndarray(tensor).unwrap();
    assert_eq!(array.shape(), &[2, 3]);
    assert_eq!(array[[1, 2]], 6.0);
}

#[test]
fn test_ndarray_to_tensor_conversion() {
    let array = ndarray::ArrayD::<f32>::from_shape_vec(vec![1, 2, 2, 1], vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    let tensor = ndarray_to_tensor(array.view()).unwrap();
    assert_eq!(tensor.shape, vec![1, 2, 2, 1]);
    assert_eq!(tensor.data, vec![1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn test_create_registry_includes_onnx() {
    let registry = create_registry(Device::Cpu);
    assert_eq!(registry.list(), vec!["onnx"]);
    assert!(registry.get("onnx").is_some());
}

#[test]
fn test_load_model_rejects_garbage_bytes() {
    let backend = OnnxBackend::new(Device::Cpu);
    let result = backend.load_model(ModelSource::Memory(b"not an onnx graph".to_vec()));
    assert!(matches!(result, Err(InferError::ModelLoad(_))));
}
