use crate::config::VendingConfig;
use crate::types::{AccountRequest, RenderedFile};

// ---------------------------------------------------------------------------
// Derived values
// ---------------------------------------------------------------------------

/// Root email of the vended account: `awsadmin+aws-{account}-{env}@{domain}`.
pub fn account_email(request: &AccountRequest, config: &VendingConfig) -> String {
    format!(
        "awsadmin+aws-{}-{}@{}",
        request.account_name, request.environment, config.email_domain
    )
}

/// Display name of the vended account: `{org}-{account}-{env}`.
pub fn account_display_name(request: &AccountRequest, config: &VendingConfig) -> String {
    format!(
        "{}-{}-{}",
        config.org_prefix, request.account_name, request.environment
    )
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Render the account-request Terraform file for one request.
///
/// Pure function of the request and the fixed config: identical inputs yield
/// byte-identical output. Writing/staging the content is the committer's job.
pub fn render_account_request(request: &AccountRequest, config: &VendingConfig) -> RenderedFile {
    let module_label = format!(
        "{}_{}",
        request.account_name.replace('-', "_"),
        request.environment
    );
    let email = account_email(request, config);
    let display_name = account_display_name(request, config);

    let content = format!(
        r#"module "{module_label}" {{
  source = "./modules/aft-account-request"

  control_tower_parameters = {{
    AccountEmail              = "{email}"
    AccountName               = "{display_name}"
    ManagedOrganizationalUnit = "{ou}"
    SSOUserEmail              = "{owner}"
    SSOUserFirstName          = "Account"
    SSOUserLastName           = "Owner"
  }}

  account_tags = {{
    "owner"       = "{owner}"
    "environment" = "{environment}"
  }}

  change_management_parameters = {{
    change_requested_by = "{owner}"
    change_reason       = "New {environment} account request for {account_name}"
  }}

  custom_fields = {{}}

  account_customizations_name = ""
}}
"#,
        module_label = module_label,
        email = email,
        display_name = display_name,
        ou = config.organizational_unit,
        owner = request.owner_email,
        environment = request.environment,
        account_name = request.account_name,
    );

    RenderedFile {
        file_name: format!("{}.tf", request.account_name),
        content,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
