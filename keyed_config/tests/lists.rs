//! Lists of nested configurations: sizes, index fallback and defaults.

mod common;

use std::sync::Arc;

use anyhow::{Result, anyhow, ensure};
use keyed_config::{ConfigError, ConfigInstance};
use rstest::rstest;

use common::{list_schema, materializer_for, overrides};

fn xs(items: &[Arc<ConfigInstance>]) -> Result<Vec<Option<i64>>> {
    items
        .iter()
        .map(|item| item.get::<i64>("x").map_err(|err| anyhow!(err.to_string())))
        .collect()
}

#[rstest]
fn unindexed_key_serves_missing_elements() -> Result<()> {
    let (schema, root) = list_schema(3, Vec::new());
    let instance = materializer_for(
        schema,
        [
            ("withPrefix[0].x", "1000"),
            ("withPrefix[1].x", "2000"),
            ("withPrefix.x", "99"),
        ],
    )
    .build()
    .materialize(root)?;
    let items = instance
        .list("items")?
        .ok_or_else(|| anyhow!("items missing"))?;
    ensure!(xs(&items)? == [Some(1000), Some(2000), Some(99)]);
    Ok(())
}

#[rstest]
fn per_index_defaults_with_sentinels() -> Result<()> {
    let (schema, root) = list_schema(
        3,
        vec![
            overrides("x", "11"),
            overrides("x", "<skip>"),
            overrides("x", "<null>"),
        ],
    );
    let instance = materializer_for(schema, []).build().materialize(root)?;
    let items = instance
        .list("items")?
        .ok_or_else(|| anyhow!("items missing"))?;
    ensure!(items.len() == 3);
    ensure!(xs(&items)? == [Some(11), Some(7), None]);
    Ok(())
}

#[rstest]
fn source_size_truncates_and_extends() -> Result<()> {
    let (schema, root) = list_schema(3, Vec::new());
    let shrunk = materializer_for(schema.clone(), [("withPrefix.size", "2")])
        .build()
        .materialize(root)?;
    ensure!(shrunk.list_size("items")? == Some(2));
    ensure!(shrunk.list("items")?.map(|items| items.len()) == Some(2));

    let grown = materializer_for(schema, [("withPrefix.size", "5"), ("withPrefix[4].x", "4")])
        .build()
        .materialize(root)?;
    let items = grown
        .list("items")?
        .ok_or_else(|| anyhow!("items missing"))?;
    ensure!(xs(&items)? == [Some(7), Some(7), Some(7), Some(7), Some(4)]);
    Ok(())
}

#[rstest]
fn truncated_view_shares_built_items() -> Result<()> {
    let (schema, root) = list_schema(3, Vec::new());
    let instance = materializer_for(schema, []).build().materialize(root)?;
    let first = instance
        .list("items")?
        .ok_or_else(|| anyhow!("items missing"))?;
    let again = instance
        .list("items")?
        .ok_or_else(|| anyhow!("items missing"))?;
    ensure!(first.len() == 3);
    ensure!(
        first
            .iter()
            .zip(again.iter())
            .all(|(a, b)| Arc::ptr_eq(a, b))
    );
    Ok(())
}

#[rstest]
fn negative_size_is_rejected() -> Result<()> {
    let (schema, root) = list_schema(1, Vec::new());
    let instance = materializer_for(schema, [("withPrefix.size", "-1")])
        .build()
        .materialize(root)?;
    let Err(err) = instance.list("items") else {
        return Err(anyhow!("negative size accepted"));
    };
    ensure!(
        matches!(*err, ConfigError::InvalidArgument { .. }),
        "unexpected error {err}"
    );
    Ok(())
}

#[rstest]
fn oversized_list_is_an_error() -> Result<()> {
    let (schema, root) = list_schema(1, Vec::new());
    let instance = materializer_for(schema, [("withPrefix.size", "9223372036854775807")])
        .build()
        .materialize(root)?;
    let Err(err) = instance.list("items") else {
        return Err(anyhow!("oversized list accepted"));
    };
    ensure!(
        matches!(*err, ConfigError::InvalidArgument { .. }),
        "unexpected error {err}"
    );
    ensure!(instance.to_json().is_err());
    Ok(())
}

#[rstest]
fn unparsable_size_fails_materialization() {
    let (schema, root) = list_schema(1, Vec::new());
    let err = materializer_for(schema, [("withPrefix.size", "many")])
        .build()
        .materialize(root)
        .expect_err("size must be an integer");
    assert!(
        matches!(*err, ConfigError::Conversion { .. }),
        "expected a conversion error, got {err}"
    );
}

#[rstest]
fn nested_lists_index_each_level() -> Result<()> {
    use keyed_config::{ConfigModel, Schema, SubConfigListProperty, ValueProperty, ValueType};

    let mut builder = Schema::builder();
    let port = builder.add(
        ConfigModel::new("Port").property(ValueProperty::new("number", ValueType::Unsigned)),
    );
    let host = builder.add(
        ConfigModel::new("Host").property(
            SubConfigListProperty::new("ports", port)
                .prefix("ports")
                .default_size(1),
        ),
    );
    let root = builder.add(
        ConfigModel::new("Cluster").prefix("cluster").property(
            SubConfigListProperty::new("hosts", host)
                .prefix("hosts")
                .default_size(2),
        ),
    );
    let instance = materializer_for(
        builder.build(),
        [
            ("cluster.hosts[1].ports[0].number", "443"),
            ("cluster.hosts.ports.number", "80"),
        ],
    )
    .build()
    .materialize(root)?;
    let hosts = instance
        .list("hosts")?
        .ok_or_else(|| anyhow!("hosts missing"))?;
    let mut numbers = Vec::new();
    for host_instance in hosts.iter() {
        let ports = host_instance
            .list("ports")?
            .ok_or_else(|| anyhow!("ports missing"))?;
        for port_instance in ports.iter() {
            numbers.push(port_instance.get::<u64>("number")?);
        }
    }
    ensure!(numbers == [Some(80), Some(443)], "unexpected ports {numbers:?}");
    Ok(())
}
