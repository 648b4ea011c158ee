//! Unit tests for key documentation.

use anyhow::{Result, anyhow, ensure};
use rstest::rstest;

use super::{DOCS_IR_VERSION, KeyDoc, describe};
use crate::{
    ConfigModel, EngineSettings, Schema, SubConfigListProperty, SubConfigProperty, ValueProperty,
    ValueType,
};

fn entry<'a>(entries: &'a [KeyDoc], path: &str) -> Result<&'a KeyDoc> {
    entries
        .iter()
        .find(|e| e.path == path)
        .ok_or_else(|| anyhow!("no entry for {path}"))
}

#[rstest]
fn documents_nested_lists_and_fallbacks() -> Result<()> {
    let mut builder = Schema::builder();
    let connection = builder.add(
        ConfigModel::new("Connection")
            .property(
                ValueProperty::new("url", ValueType::String)
                    .description("Database URL")
                    .fallback_key("DATABASE_URL")
                    .required(),
            )
            .property(ValueProperty::new("password", ValueType::String).decrypt_with("vault")),
    );
    let server = builder.add(
        ConfigModel::new("Server")
            .property(ValueProperty::new("port", ValueType::Unsigned).default_value("80")),
    );
    let root = builder.add(
        ConfigModel::new("App")
            .prefix("app")
            .property(
                SubConfigProperty::new("db", connection)
                    .prefix("database")
                    .default_for("url", "postgres://localhost"),
            )
            .property(
                SubConfigListProperty::new("servers", server)
                    .prefix("servers")
                    .default_size(2),
            ),
    );
    let settings = EngineSettings {
        fallback_prefix: Some("global".into()),
        ..EngineSettings::default()
    };
    let docs = describe(&builder.build(), root, &settings).map_err(|e| anyhow!(e.to_string()))?;
    ensure!(docs.ir_version == DOCS_IR_VERSION);
    ensure!(docs.type_name == "App");

    let url = entry(&docs.entries, "db.url")?;
    ensure!(url.keys == ["app.database.url", "global.url", "DATABASE_URL"]);
    ensure!(url.default.as_deref() == Some("postgres://localhost"));
    ensure!(url.required && url.description.as_deref() == Some("Database URL"));
    ensure!(entry(&docs.entries, "db.password")?.encrypted);

    let size = entry(&docs.entries, "servers.size")?;
    ensure!(size.keys == ["app.servers.size", "global.servers.size"]);
    ensure!(size.default.as_deref() == Some("2"));

    let port = entry(&docs.entries, "servers[*].port")?;
    ensure!(
        port.keys == ["app.servers[*].port", "app.servers.port", "global.port"],
        "unexpected keys {:?}",
        port.keys
    );
    ensure!(port.value_type == "unsigned integer");
    Ok(())
}

#[rstest]
fn docs_serialise_to_json() -> Result<()> {
    let mut builder = Schema::builder();
    let root =
        builder.add(ConfigModel::new("Tiny").property(ValueProperty::new("flag", ValueType::Bool)));
    let docs = describe(&builder.build(), root, &EngineSettings::default())
        .map_err(|e| anyhow!(e.to_string()))?;
    let json = serde_json::to_value(&docs)?;
    ensure!(json["entries"][0]["keys"] == serde_json::json!(["flag"]));
    Ok(())
}
