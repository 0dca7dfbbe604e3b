//! `start`, `stop` and `provision`.

use nixtrobed_config::{DistroConfig, ProjectLayout};
use nixtrobed_core::error::Result;
use nixtrobed_core::tb_warning;
use nixtrobed_messages::{msg, MESSAGES};
use nixtrobed_provider::vagrantfile::generate_vagrantfile;
use nixtrobed_provider::{Provider, VagrantAction, VagrantProvider};
use tracing::{debug, warn};

use super::targets::{TargetPlan, Targets};

/// Handles `nixtrobed start|stop|provision [DISTROS...]` in `layout`.
pub fn handle_lifecycle(
    layout: &ProjectLayout,
    action: VagrantAction,
    distros: &[String],
) -> Result<()> {
    layout.verify_project_root()?;
    let targets = Targets::from_requested(distros);

    // halt works against the Vagrantfile left by the last start/provision
    if action != VagrantAction::Halt {
        let config = refresh_vagrantfile(layout)?;
        warn_unknown_targets(layout, &config, &targets);
    }

    let provider = VagrantProvider::new(layout)?;
    run_targets(&provider, action, &targets)
}

/// Parse the distro list and regenerate the Vagrantfile from it.
pub fn refresh_vagrantfile(layout: &ProjectLayout) -> Result<DistroConfig> {
    let config = DistroConfig::load(&layout.distros_file())?;
    generate_vagrantfile(layout, &config)?;
    Ok(config)
}

pub fn run_targets<P: Provider + ?Sized>(
    provider: &P,
    action: VagrantAction,
    targets: &Targets,
) -> Result<()> {
    let mut plan = TargetPlan::new(action, targets);
    debug!(invocations = plan.invocations().len(), %action, "dispatching");
    plan.execute(provider)
}

// Unknown names still go to Vagrant, which reports the failure itself.
fn warn_unknown_targets(layout: &ProjectLayout, config: &DistroConfig, targets: &Targets) {
    for name in targets.names() {
        if !config.contains(name) {
            warn!(target_name = %name, "requested distro is not declared");
            tb_warning!(
                "{}",
                msg!(
                    MESSAGES.distro_unknown_target,
                    name = name.as_str(),
                    path = layout.distros_file().display().to_string()
                )
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nixtrobed_config::scaffold::initialize;
    use nixtrobed_core::error::{MissingField, TestbedError};
    use nixtrobed_provider::mock::MockProvider;
    use std::fs;
    use tempfile::TempDir;

    fn testbed() -> (TempDir, ProjectLayout) {
        let temp_dir = TempDir::new().unwrap();
        let layout = initialize(&temp_dir.path().join("testbed")).unwrap();
        (temp_dir, layout)
    }

    #[test]
    fn test_refresh_generates_vagrantfile() {
        let (_temp_dir, layout) = testbed();
        assert!(!layout.vagrantfile().exists());

        let config = refresh_vagrantfile(&layout).unwrap();

        let vagrantfile = fs::read_to_string(layout.vagrantfile()).unwrap();
        for name in config.names() {
            assert!(vagrantfile.contains(&format!("config.vm.define \"{name}\"")));
        }
    }

    #[test]
    fn test_refresh_is_byte_identical_across_runs() {
        let (_temp_dir, layout) = testbed();
        refresh_vagrantfile(&layout).unwrap();
        let first = fs::read(layout.vagrantfile()).unwrap();
        refresh_vagrantfile(&layout).unwrap();
        assert_eq!(first, fs::read(layout.vagrantfile()).unwrap());
    }

    #[test]
    fn test_malformed_config_stops_before_render() {
        let (_temp_dir, layout) = testbed();
        fs::write(layout.distros_file(), "#name,box,playbook\n,generic/fedora33,\n").unwrap();

        let err = refresh_vagrantfile(&layout).unwrap_err();

        assert!(matches!(
            err,
            TestbedError::MalformedConfig {
                line: 2,
                field: MissingField::Name,
                ..
            }
        ));
        assert!(!layout.vagrantfile().exists());
    }

    #[test]
    fn test_lifecycle_outside_project_root() {
        let temp_dir = TempDir::new().unwrap();
        let layout = ProjectLayout::new(temp_dir.path());

        let err = handle_lifecycle(&layout, VagrantAction::Up, &[]).unwrap_err();
        assert!(matches!(err, TestbedError::NotAProjectRoot { .. }));
        assert!(!layout.vagrantfile().exists());
    }

    #[test]
    fn test_run_targets_stops_at_first_failure() {
        let provider = MockProvider::new().fail_on("fed", 3);
        let targets = Targets::from_requested(&["fed".to_string(), "deb".to_string()]);

        let err = run_targets(&provider, VagrantAction::Up, &targets).unwrap_err();

        assert_eq!(err.exit_code(), 3);
        assert_eq!(provider.calls().len(), 1);
    }

    #[test]
    fn test_run_targets_empty_request_is_single_call() {
        let provider = MockProvider::new();
        run_targets(&provider, VagrantAction::Up, &Targets::from_requested(&[])).unwrap();
        assert_eq!(provider.calls(), vec![(VagrantAction::Up, None)]);
    }
}
