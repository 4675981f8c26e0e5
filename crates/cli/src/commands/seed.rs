use crate::commands::{build_runtime, load_config, CommandResult};
use pulse_db::{connect_with_settings, migrations, seed_demo_customer, SeedSummary};

pub fn run() -> CommandResult {
    let config = match load_config("seed") {
        Ok(config) => config,
        Err(failure) => return failure,
    };
    let runtime = match build_runtime("seed") {
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

        let summary = seed_demo_customer(&pool)
            .await
            .map_err(|error| ("seed_execution", error.to_string(), 5u8))?;

        pool.close().await;
        Ok::<SeedSummary, (&'static str, String, u8)>(summary)
    });

    match result {
        Ok(summary) => CommandResult::success("seed", seed_message(&summary)),
        Err((error_class, message, exit_code)) => {
            CommandResult::failure("seed", error_class, message, exit_code)
        }
    }
}

fn seed_message(summary: &SeedSummary) -> String {
    format!(
        "seeded demo customer {}: {} orders, {} invoices, {} quotes, {} issues, {} interactions",
        summary.customer_id,
        summary.orders,
        summary.invoices,
        summary.quotes,
        summary.issues,
        summary.interactions
    )
}

#[cfg(test)]
mod tests {
    use pulse_db::SeedSummary;

    use super::seed_message;

    #[test]
    fn seed_message_lists_every_entity_count() {
        let summary = SeedSummary {
            customer_id: 1,
            orders: 7,
            invoices: 5,
            quotes: 3,
            issues: 3,
            interactions: 6,
        };
        assert_eq!(
            seed_message(&summary),
            "seeded demo customer 1: 7 orders, 5 invoices, 3 quotes, 3 issues, 6 interactions"
        );
    }
}
