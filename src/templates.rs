use askama::Template;

#[derive(Template)]
#[template(path = "modules-load.conf", escape = "none")]
pub struct ModulesLoad<'a> {
	pub modules: &'a [&'a str],
}

pub struct SysctlSetting<'a> {
	pub key: &'a str,
	pub value: &'a str,
}

#[derive(Template)]
#[template(path = "sysctl.conf", escape = "none")]
pub struct SysctlConf<'a> {
	pub settings: &'a [SysctlSetting<'a>],
}

#[derive(Template)]
#[template(path = "hello-world.yaml", escape = "none")]
pub struct Workload<'a> {
	pub name: &'a str,
	pub namespace: &'a str,
	pub image: &'a str,
	pub container_port: u16,
	pub service_port: u16,
	pub ingress_class: &'a str,
	pub host: Option<&'a str>,
}
