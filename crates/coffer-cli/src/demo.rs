//! The end-to-end demo flow.

use anyhow::Context;
use coffer_proto::{ClientSettings, PasswordGeneratorRequest, SecretId};
use coffer_fake_core::FakeVaultCore;
use coffer_sdk::Client;
use tracing::debug;

use crate::cli::Cli;

pub(crate) fn run(args: &Cli) -> anyhow::Result<()> {
    let settings = ClientSettings {
        api_url: args.api_url.clone(),
        identity_url: args.identity_url.clone(),
    };
    debug!(
        api_url = settings.effective_api_url(),
        identity_url = settings.effective_identity_url(),
        "configured"
    );

    let client = Client::new(FakeVaultCore::with_settings(settings));

    client
        .login(&args.access_token, args.state_file.as_deref())
        .context("login failed (the demo core accepts any unexpired JWT access token)")?;
    println!("authenticated");

    let project = client.projects().create(&args.project_name)?;
    println!("created project {} ({})", project.name, project.id);

    let projects = client.projects().list()?;
    println!("organization has {} project(s)", projects.data.len());

    client.projects().get(&project.id)?;
    let renamed = client
        .projects()
        .update(&project.id, &format!("{}-2", args.project_name))?;
    println!("renamed project to {}", renamed.name);

    let password = client.generators().generate_password(PasswordGeneratorRequest {
        length: 32,
        ..Default::default()
    })?;
    println!("generated a {}-character secret value", password.len());

    let secret = client
        .secrets()
        .create("demo-key", &password, "demo secret", vec![project.id.clone()])?;
    println!("created secret {} ({})", secret.key, secret.id);

    client.secrets().get(&secret.id)?;
    client.secrets().update(
        &secret.id,
        "demo-key",
        &password,
        "demo secret, revised",
        vec![project.id.clone()],
    )?;

    let identifiers = client.secrets().list()?;
    println!("machine account sees {} secret(s)", identifiers.data.len());

    let ids: Vec<SecretId> = identifiers.data.iter().map(|s| s.id.clone()).collect();
    let hydrated = client.secrets().get_by_ids(ids)?;
    println!("hydrated {} secret(s)", hydrated.data.len());

    let synced = client.secrets().sync(None)?;
    println!("sync reports changes: {}", synced.has_changes);

    client.secrets().delete(vec![secret.id.clone()])?;
    client.projects().delete(vec![project.id.clone()])?;
    println!("cleaned up");

    client.close();
    Ok(())
}
