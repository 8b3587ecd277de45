use assert_cmd::Command;
use std::path::Path;

/// The talentdesk binary, pointed at `api_endpoint` with its own credentials file.
///
/// cargo always builds binaries before building the `[[test]]`s, so this should just exist
pub fn talentdesk(credentials_file: &Path, api_endpoint: &str) -> Command {
    let mut cmd = Command::cargo_bin("talentdesk").expect("talentdesk binary is built");
    cmd.env_remove("TALENTDESK_TOKEN")
        .env("RUST_LOG", "talentdesk_cli=debug")
        .arg("--no-colors")
        .arg("--api-endpoint")
        .arg(api_endpoint)
        .arg("--credentials-file")
        .arg(credentials_file);

    tracing::info!(?cmd, "Prepared a talentdesk process");
    cmd
}

/// Credentials file holding `token` the way `talentdesk login` persists it
pub fn credentials(token: &str) -> String {
    serde_json::json!({ "authToken": token }).to_string()
}
