//! Vagrantfile generation from the testbed's `Vagrantfile.jinja`.
//!
//! The template sees two variables: `distros`, the parsed distro list in
//! file order, and `autogenerated_warning_message`, the do-not-edit banner.

use std::error::Error as StdError;
use std::path::{Path, PathBuf};

use nixtrobed_config::defaults::autogenerated_warning;
use nixtrobed_config::{DistroConfig, ProjectLayout};
use nixtrobed_core::error::{Result, TestbedError};
use nixtrobed_core::file_system::{read_file, write_file};
use nixtrobed_messages::{msg, MESSAGES};
use tera::{Context as TeraContext, Tera};
use tracing::{debug, info};

const TEMPLATE_NAME: &str = "Vagrantfile.jinja";

pub struct VagrantfileRenderer {
    tera: Tera,
    template_path: PathBuf,
}

impl VagrantfileRenderer {
    /// Compile template text. `template_path` is used for error messages.
    pub fn from_source(source: &str, template_path: impl Into<PathBuf>) -> Result<Self> {
        let template_path = template_path.into();
        let mut tera = Tera::default();
        tera.add_raw_template(TEMPLATE_NAME, source)
            .map_err(|e| template_error(&template_path, &e))?;
        Ok(Self {
            tera,
            template_path,
        })
    }

    /// Load the template from the testbed.
    pub fn load(layout: &ProjectLayout) -> Result<Self> {
        let template_path = layout.template_file();
        let source = read_file(&template_path)?;
        Self::from_source(&source, template_path)
    }

    pub fn render(&self, distros: &DistroConfig) -> Result<String> {
        let mut context = TeraContext::new();
        context.insert("distros", distros.records());
        context.insert("autogenerated_warning_message", &autogenerated_warning());

        self.tera
            .render(TEMPLATE_NAME, &context)
            .map_err(|e| template_error(&self.template_path, &e))
    }

    /// Render and overwrite `output`.
    pub fn write(&self, distros: &DistroConfig, output: &Path) -> Result<()> {
        let content = self.render(distros)?;
        write_file(output, &content)?;
        debug!(bytes = content.len(), "wrote vagrantfile");
        Ok(())
    }
}

/// Regenerate the testbed's Vagrantfile from its template and distro list.
pub fn generate_vagrantfile(layout: &ProjectLayout, distros: &DistroConfig) -> Result<PathBuf> {
    let renderer = VagrantfileRenderer::load(layout)?;
    let output = layout.vagrantfile();
    renderer.write(distros, &output)?;
    info!(
        "{}",
        msg!(
            MESSAGES.vagrantfile_generated,
            path = output.display().to_string(),
            count = distros.len().to_string()
        )
    );
    Ok(output)
}

// Tera nests the useful detail (line, column, missing variable) in the
// source chain, so flatten it into one message.
fn template_error(path: &Path, err: &tera::Error) -> TestbedError {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = inner.source();
    }
    TestbedError::Template {
        path: path.to_path_buf(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nixtrobed_config::defaults::VAGRANTFILE_TEMPLATE_TEXT;
    use nixtrobed_config::scaffold::initialize;
    use nixtrobed_config::DistroRecord;
    use std::fs;
    use tempfile::TempDir;

    fn sample_distros() -> DistroConfig {
        DistroConfig::from_records(vec![
            DistroRecord::new("fed", "generic/fedora33", "default.yml"),
            DistroRecord::new("deb", "debian/bullseye64", "custom.yml"),
        ])
    }

    fn default_renderer() -> VagrantfileRenderer {
        VagrantfileRenderer::from_source(VAGRANTFILE_TEMPLATE_TEXT, "Vagrantfile.jinja").unwrap()
    }

    #[test]
    fn test_render_declares_each_distro_in_order() {
        let output = default_renderer().render(&sample_distros()).unwrap();

        let fed = output.find("config.vm.define \"fed\" do |fed|").unwrap();
        let deb = output.find("config.vm.define \"deb\" do |deb|").unwrap();
        assert!(fed < deb);
        assert!(output.contains("fed.vm.box = \"generic/fedora33\""));
        assert!(output.contains("ansible.playbook = \"provisioning/playbooks/custom.yml\""));
        assert!(output.contains("ansible.config_file = \"provisioning/ansible.cfg\""));
    }

    #[test]
    fn test_render_starts_with_warning_banner() {
        let output = default_renderer().render(&sample_distros()).unwrap();
        let banner_at = output.find("# WARNING: This file will be overwritten").unwrap();
        let configure_at = output.find("Vagrant.configure").unwrap();
        assert!(banner_at < configure_at);
        assert!(output.contains("Make any changes in the Vagrantfile.jinja file."));
    }

    #[test]
    fn test_render_is_deterministic() {
        let renderer = default_renderer();
        let first = renderer.render(&sample_distros()).unwrap();
        let second = default_renderer().render(&sample_distros()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, renderer.render(&sample_distros()).unwrap());
    }

    #[test]
    fn test_render_empty_list() {
        let output = default_renderer().render(&DistroConfig::default()).unwrap();
        assert!(!output.contains("config.vm.define"));
        assert!(output.trim_end().ends_with("end"));
    }

    #[test]
    fn test_broken_template_is_template_error() {
        let err = VagrantfileRenderer::from_source("{% for distro in distros %}", "broken.jinja")
            .err()
            .unwrap();
        assert!(matches!(err, TestbedError::Template { ref path, .. } if path == Path::new("broken.jinja")));
    }

    #[test]
    fn test_unknown_variable_is_template_error() {
        let renderer = VagrantfileRenderer::from_source("{{ nope }}", "Vagrantfile.jinja").unwrap();
        let err = renderer.render(&sample_distros()).unwrap_err();
        assert!(matches!(err, TestbedError::Template { .. }));
    }

    #[test]
    fn test_generate_overwrites_vagrantfile() {
        let temp_dir = TempDir::new().unwrap();
        let layout = initialize(&temp_dir.path().join("testbed")).unwrap();
        fs::write(layout.vagrantfile(), "stale").unwrap();

        let path = generate_vagrantfile(&layout, &sample_distros()).unwrap();
        let content = fs::read_to_string(path).unwrap();
        assert!(!content.contains("stale"));
        assert!(content.contains("deb.vm.box = \"debian/bullseye64\""));
    }

    #[test]
    fn test_generate_uses_edited_template() {
        let temp_dir = TempDir::new().unwrap();
        let layout = initialize(&temp_dir.path().join("testbed")).unwrap();
        fs::write(
            layout.template_file(),
            "{% for d in distros %}{{ d.name }}={{ d.box }};{% endfor %}",
        )
        .unwrap();

        generate_vagrantfile(&layout, &sample_distros()).unwrap();
        assert_eq!(
            fs::read_to_string(layout.vagrantfile()).unwrap(),
            "fed=generic/fedora33;deb=debian/bullseye64;"
        );
    }
}
