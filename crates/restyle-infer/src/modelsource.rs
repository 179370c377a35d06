use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum ModelSource {
    File(PathBuf),
    Memory(Vec<u8>),
}
