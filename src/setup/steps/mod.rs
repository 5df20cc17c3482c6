pub mod containerd;
pub mod control_plane;
pub mod disable_swap;
pub mod ingress;
pub mod kernel_modules;
pub mod kubeconfig;
pub mod kubes;
pub mod pod_network;
pub mod sysctl;
pub mod untaint;
pub mod workload;

pub use containerd::Containerd;
pub use control_plane::ControlPlane;
pub use disable_swap::DisableSwap;
pub use ingress::IngressController;
pub use kernel_modules::KernelModules;
pub use kubeconfig::Kubeconfig;
pub use kubes::Kubes;
pub use pod_network::PodNetwork;
pub use sysctl::Sysctl;
pub use untaint::Untaint;
pub use workload::SampleWorkload;
