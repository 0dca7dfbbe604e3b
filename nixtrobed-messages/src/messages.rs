//! Central registry for all user-facing message templates.
//!
//! Templates use `{variable}` syntax for runtime values, which are
//! substituted by the `MessageBuilder` (see the `msg!` macro).

pub struct Messages {
    // ============================================================================
    // Init Messages
    // ============================================================================
    pub init_already_exists: &'static str,
    pub init_created: &'static str,
    pub init_next_steps: &'static str,

    // ============================================================================
    // Project Messages
    // ============================================================================
    pub project_missing_entry: &'static str,
    pub project_hint: &'static str,
    pub vagrantfile_generated: &'static str,

    // ============================================================================
    // Distro Config Messages
    // ============================================================================
    pub distro_duplicate: &'static str,
    pub distro_missing_box: &'static str,
    pub distro_missing_name: &'static str,
    pub distro_unknown_target: &'static str,
    pub distro_unterminated_quote: &'static str,

    // ============================================================================
    // Target Operations
    // ============================================================================
    pub target_all: &'static str,
    pub target_halting: &'static str,
    pub target_provisioning: &'static str,
    pub target_starting: &'static str,
    pub target_succeeded: &'static str,

    // ============================================================================
    // Error Messages
    // ============================================================================
    pub error_dependency: &'static str,
    pub error_external_tool: &'static str,
    pub error_filesystem: &'static str,
    pub error_generic: &'static str,
    pub error_template: &'static str,
    pub error_vagrant_failed: &'static str,
}

pub const MESSAGES: Messages = Messages {
    // Init
    init_already_exists: "{path} already exists. The testbed directory must not exist yet.",
    init_created: "Initialized testbed directory '{path}'",
    init_next_steps: "💡 Next steps:\n  • cd {path}\n  • Edit nixtrobed.distros to pick your distros\n  • nixtrobed start <distro>",

    // Project
    project_missing_entry: "{name} is missing. Are you in a nixtrobed directory?",
    project_hint: "Run 'nixtrobed init <directory>' to create a testbed",
    vagrantfile_generated: "Generated {path} for {count} distros",

    // Distro config
    distro_duplicate: "Duplicate distro in {path}. Line {line} reuses the name '{name}' from line {first_line}.",
    distro_missing_box: "Malformed line in {path}. Line {line} contains no box name.",
    distro_missing_name: "Malformed line in {path}. Line {line} contains no distro name.",
    distro_unknown_target: "'{name}' is not declared in {path}, passing it to Vagrant anyway",
    distro_unterminated_quote: "Malformed line in {path}. Line {line} has an unterminated quote.",

    // Target operations
    target_all: "all distros",
    target_halting: "Stopping {name}...",
    target_provisioning: "Provisioning {name}...",
    target_starting: "Starting {name}...",
    target_succeeded: "{action} finished for {name}",

    // Errors
    error_dependency: "{tool} was not found on PATH. Install it or point NIXTROBED_VAGRANT at the binary.",
    error_external_tool: "Command failed with exit code {code}: {command}",
    error_filesystem: "Failed to {operation} {path}: {error}",
    error_generic: "❌ Error: {error}",
    error_template: "Failed to render {path}: {error}",
    error_vagrant_failed: "An error occurred when calling Vagrant. See above for details.",
};
