//! Built-in contents written by `nixtrobed init`.

use crate::distros::{DistroConfig, DistroRecord};
use crate::layout::VAGRANTFILE_TEMPLATE;

/// `(name, box)` pairs of the distros a new testbed starts with.
pub const DEFAULT_DISTRIBUTIONS: &[(&str, &str)] = &[
    ("alma8", "almalinux/8"),
    ("fedora33", "generic/fedora33"),
    ("debian11", "debian/bullseye64"),
    ("debian10", "debian/buster64"),
    ("ubuntu2204", "ubuntu/jammy64"),
    ("ubuntu2004", "ubuntu/focal64"),
];

/// Editable starting point for the generated Vagrantfile.
pub const VAGRANTFILE_TEMPLATE_TEXT: &str = r#"# -*- mode: ruby -*-
# vi: set ft=ruby :
{{ autogenerated_warning_message }}

Vagrant.configure("2") do |config|
  {% for distro in distros %}
  config.vm.define "{{ distro.name }}" do |{{ distro.name }}|
    {{ distro.name }}.vm.box = "{{ distro.box }}"

    {{ distro.name }}.vm.provision "ansible" do |ansible|
      ansible.config_file = "provisioning/ansible.cfg"
      ansible.playbook = "provisioning/playbooks/{{ distro.playbook }}"
    end
  end
  {% endfor %}
end
"#;

pub const ANSIBLE_CONFIG_TEXT: &str = "[defaults]\nroles_path = roles\n";

pub const DEFAULT_PLAYBOOK_TEXT: &str = "---\n\n- hosts: all\n  tasks:\n  roles:\n";

/// Banner placed at the top of every generated Vagrantfile.
pub fn autogenerated_warning() -> String {
    format!(
        "#\n\
         # WARNING: This file will be overwritten on each invocation of nixtrobed!\n\
         #          Make any changes in the {} file.\n\
         #\n",
        VAGRANTFILE_TEMPLATE
    )
}

pub fn default_distros() -> DistroConfig {
    DistroConfig::from_records(
        DEFAULT_DISTRIBUTIONS
            .iter()
            .map(|(name, r#box)| DistroRecord::with_default_playbook(*name, *r#box))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::DEFAULT_PLAYBOOK_NAME;
    use std::path::Path;

    #[test]
    fn test_default_distros_parse_back() {
        let text = default_distros().to_file_contents();
        let parsed = DistroConfig::parse_str(&text, Path::new("nixtrobed.distros")).unwrap();
        assert_eq!(parsed.len(), DEFAULT_DISTRIBUTIONS.len());
        assert!(parsed.iter().all(|r| r.playbook == DEFAULT_PLAYBOOK_NAME));
        assert_eq!(parsed.names()[0], "alma8");
    }

    #[test]
    fn test_warning_names_template_file() {
        let banner = autogenerated_warning();
        assert!(banner.contains("WARNING"));
        assert!(banner.contains("Vagrantfile.jinja"));
        assert!(banner.lines().all(|line| line.starts_with('#')));
    }
}
