//! Candidate key ordering and fallback precedence through the materializer.

mod common;

use std::sync::Arc;

use anyhow::{Result, anyhow, ensure};
use keyed_config::{
    ConfigModel, KeyGenerator, MapSource, Materializer, Schema, ValueProperty, ValueType,
};
use rstest::rstest;

use common::{connection_schema, materializer_for};

#[rstest]
fn append_and_compute_keys_order() {
    let generator = KeyGenerator::empty()
        .append(&["a", "b"])
        .append(&["x", "y"]);
    assert_eq!(generator.prefixes(), ["a.x", "b.x", "a.y", "b.y"]);
    assert_eq!(
        generator.compute_keys_for(&["k1", "k2"]),
        [
            "a.x.k1", "a.x.k2", "b.x.k1", "b.x.k2", "a.y.k1", "a.y.k2", "b.y.k1", "b.y.k2"
        ]
    );
}

#[rstest]
#[case::prefixed_key_wins(&[("root.connection.url", "url"), ("global.url", "fallback")], "url")]
#[case::fallback_prefix_used(&[("global.url", "fallback")], "fallback")]
fn fallback_prefix_precedence(
    #[case] entries: &[(&str, &str)],
    #[case] expected: &str,
) -> Result<()> {
    let (schema, root) = connection_schema();
    let source: MapSource = entries.iter().copied().collect();
    let materializer = Materializer::builder(Arc::new(schema), Arc::new(source))
        .fallback_prefix("global")
        .build();
    let instance = materializer.materialize(root)?;
    let connection = instance
        .sub("connection")
        .ok_or_else(|| anyhow!("connection missing"))?;
    ensure!(
        connection.candidate_keys("url")
            == Some(&["root.connection.url".to_owned(), "global.url".to_owned()][..])
    );
    ensure!(connection.get::<String>("url")?.as_deref() == Some(expected));
    Ok(())
}

#[rstest]
fn absolute_fallback_key_is_tried_last() -> Result<()> {
    let mut builder = Schema::builder();
    let root = builder.add(
        ConfigModel::new("App").prefix("app").property(
            ValueProperty::new("url", ValueType::String).fallback_key("DATABASE_URL"),
        ),
    );
    let instance = materializer_for(builder.build(), [("DATABASE_URL", "postgres://env")])
        .build()
        .materialize(root)?;
    ensure!(instance.get::<String>("url")?.as_deref() == Some("postgres://env"));
    ensure!(
        instance.candidate_keys("url")
            == Some(&["app.url".to_owned(), "DATABASE_URL".to_owned()][..])
    );
    Ok(())
}

#[rstest]
fn declared_keys_are_tried_in_order_per_prefix() -> Result<()> {
    let mut builder = Schema::builder();
    let root = builder.add(
        ConfigModel::new("App").prefix("app").prefix("application").property(
            ValueProperty::new("port", ValueType::Unsigned)
                .key("port")
                .key("listen_port"),
        ),
    );
    let instance = materializer_for(
        builder.build(),
        [("app.listen_port", "1"), ("application.port", "2")],
    )
    .build()
    .materialize(root)?;
    ensure!(
        instance.candidate_keys("port")
            == Some(
                &[
                    "app.port".to_owned(),
                    "app.listen_port".to_owned(),
                    "application.port".to_owned(),
                    "application.listen_port".to_owned(),
                ][..]
            )
    );
    ensure!(instance.get::<u64>("port")? == Some(1));
    Ok(())
}

#[rstest]
fn static_default_used_when_no_key_present() -> Result<()> {
    let (schema, root) = connection_schema();
    let instance = materializer_for(schema, []).build().materialize(root)?;
    let connection = instance
        .sub("connection")
        .ok_or_else(|| anyhow!("connection missing"))?;
    ensure!(connection.get::<u64>("timeout")? == Some(30));
    ensure!(connection.value("url")?.is_none());
    Ok(())
}
