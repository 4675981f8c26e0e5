use std::sync::Arc;

use serde::Serialize;

use crate::commands::{build_runtime, load_config, serialize_payload, CommandResult};
use pulse_core::{CustomerId, SnapshotService, SnapshotViewModel};
use pulse_db::repositories::{
    SqlCustomerRepository, SqlInteractionRepository, SqlInvoiceRepository, SqlIssueRepository,
    SqlOrderRepository, SqlQuoteRepository,
};
use pulse_db::{connect_with_settings, migrations, DbPool};

#[derive(Debug, Serialize)]
struct SnapshotPayload {
    command: &'static str,
    status: &'static str,
    snapshot: SnapshotViewModel,
}

#[derive(Debug, Serialize)]
struct NotFoundPayload {
    command: &'static str,
    status: &'static str,
    customer_id: i64,
}

pub fn run(customer_id: i64) -> CommandResult {
    let config = match load_config("snapshot") {
        Ok(config) => config,
        Err(failure) => return failure,
    };
    let runtime = match build_runtime("snapshot") {
        Ok(runtime) => runtime,
        Err(failure) => return failure,
    };

    let result = runtime.block_on(async {
        let pool = connect_with_settings(
            &config.database.url,
            config.database.max_connections,
            config.database.timeout_secs,
        )
        .await
        .map_err(|error| ("db_connectivity", error.to_string(), 4u8))?;

        migrations::run_pending(&pool)
            .await
            .map_err(|error| ("migration", error.to_string(), 5u8))?;

        let snapshot = snapshot_service(pool.clone())
            .get_snapshot(&CustomerId(customer_id))
            .await
            .map_err(|error| ("assembly", error.to_string(), 5u8))?;

        pool.close().await;
        Ok::<Option<SnapshotViewModel>, (&'static str, String, u8)>(snapshot)
    });

    match result {
        Ok(Some(snapshot)) => {
            let payload = SnapshotPayload { command: "snapshot", status: "ok", snapshot };
            CommandResult { exit_code: 0, output: serialize_payload(&payload) }
        }
        Ok(None) => {
            let payload =
                NotFoundPayload { command: "snapshot", status: "not_found", customer_id };
            CommandResult { exit_code: 0, output: serialize_payload(&payload) }
        }
        Err((error_class, message, exit_code)) => {
            CommandResult::failure("snapshot", error_class, message, exit_code)
        }
    }
}

fn snapshot_service(pool: DbPool) -> SnapshotService {
    SnapshotService::new(
        Arc::new(SqlCustomerRepository::new(pool.clone())),
        Arc::new(SqlOrderRepository::new(pool.clone())),
        Arc::new(SqlInvoiceRepository::new(pool.clone())),
        Arc::new(SqlQuoteRepository::new(pool.clone())),
        Arc::new(SqlIssueRepository::new(pool.clone())),
        Arc::new(SqlInteractionRepository::new(pool)),
    )
}
