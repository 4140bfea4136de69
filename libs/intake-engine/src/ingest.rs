use intake_api::config::ConfigValues;
use intake_api::reader::RecordSink;
use intake_api::schema::Field;

use crate::config::{JobConfig, parse_config_values};
use crate::error::EngineError;
use crate::registry::ComponentRegistry;

/// Drive one reader through its full lifecycle.
///
/// Construct via the registry, `init` against the declared schema, one
/// `update` pass to end-of-stream, then `finish` — which runs whether or not
/// the update pass failed, so the source resource is always released.
/// Every failure is logged before being returned; the log stream is the
/// diagnostic side channel, the `Result` is the control-flow signal.
pub fn run_reader(
    registry: &ComponentRegistry,
    component: &str,
    config: &ConfigValues,
    path: &str,
    fields: &[Field],
    sink: &mut dyn RecordSink,
) -> Result<(), EngineError> {
    let ctx = format!("reader '{component}'");

    let mut reader = registry.instantiate(component, config).inspect_err(|e| {
        tracing::error!(component, error = %e, "failed to construct reader");
    })?;

    tracing::info!(component, path, num_fields = fields.len(), "starting ingest");

    if let Err(e) = reader.init(path, fields) {
        let e = EngineError::from(e).with_context(&ctx);
        tracing::error!(component, path, error = %e, "reader init failed");
        return Err(e);
    }

    let result = reader.update(sink);
    reader.finish();

    match result {
        Ok(()) => {
            tracing::info!(component, path, "ingest finished");
            Ok(())
        }
        Err(e) => {
            let e = EngineError::from(e).with_context(&ctx);
            tracing::error!(component, path, error = %e, "reader update failed");
            Err(e)
        }
    }
}

/// Run one configured ingest job.
pub fn run_job(
    registry: &ComponentRegistry,
    job: &JobConfig,
    sink: &mut dyn RecordSink,
) -> Result<(), EngineError> {
    let config = parse_config_values(job.config.as_ref())
        .map_err(|e| e.with_context(format!("job '{}'", job.name)))?;
    run_reader(registry, &job.reader, &config, &job.path, &job.fields, sink)
}
