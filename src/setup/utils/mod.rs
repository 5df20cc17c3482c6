pub mod digest;
pub mod kctl;
pub mod kubeadm;
pub mod manifest;
pub mod patch;
pub mod pkg;
