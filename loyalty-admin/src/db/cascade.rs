//! Cascading deletes
//!
//! Foreign keys carry no `ON DELETE CASCADE`; each plan lists every dependent
//! table in an order the constraints accept, and runs inside the caller's
//! transaction. `$1` is the ID of the row being deleted.

use sqlx::PgConnection;

#[derive(Debug, Clone, Copy)]
pub struct CascadeStep {
    pub table: &'static str,
    pub sql: &'static str,
}

/// Everything that references a business, leaves first
pub const BUSINESS_CASCADE: &[CascadeStep] = &[
    CascadeStep {
        table: "refresh_tokens",
        sql: "DELETE FROM refresh_tokens WHERE subject_kind = 'admin'
              AND subject_id IN (SELECT id FROM admins WHERE business_id = $1)",
    },
    CascadeStep {
        table: "reviews",
        sql: "DELETE FROM reviews WHERE business_id = $1
              OR transaction_id IN (SELECT id FROM transactions WHERE business_id = $1)",
    },
    CascadeStep {
        table: "transactions",
        sql: "DELETE FROM transactions WHERE business_id = $1",
    },
    CascadeStep {
        table: "participations",
        sql: "DELETE FROM participations WHERE business_id = $1
              OR campaign_id IN (SELECT id FROM campaigns WHERE business_id = $1)",
    },
    CascadeStep {
        table: "terminals",
        sql: "DELETE FROM terminals WHERE business_id = $1",
    },
    CascadeStep {
        table: "campaigns",
        sql: "DELETE FROM campaigns WHERE business_id = $1",
    },
    CascadeStep {
        table: "customer_businesses",
        sql: "DELETE FROM customer_businesses WHERE business_id = $1",
    },
    CascadeStep {
        table: "admins",
        sql: "DELETE FROM admins WHERE business_id = $1",
    },
];

/// Everything that references a customer, leaves first
pub const CUSTOMER_CASCADE: &[CascadeStep] = &[
    CascadeStep {
        table: "refresh_tokens",
        sql: "DELETE FROM refresh_tokens WHERE subject_kind = 'customer' AND subject_id = $1",
    },
    CascadeStep {
        table: "reviews",
        sql: "DELETE FROM reviews WHERE customer_id = $1
              OR transaction_id IN (SELECT id FROM transactions WHERE customer_id = $1)",
    },
    CascadeStep {
        table: "transactions",
        sql: "DELETE FROM transactions WHERE customer_id = $1",
    },
    CascadeStep {
        table: "participations",
        sql: "DELETE FROM participations WHERE customer_id = $1",
    },
    CascadeStep {
        table: "customer_businesses",
        sql: "DELETE FROM customer_businesses WHERE customer_id = $1",
    },
];

/// Run every step of `plan` for `id`; returns the total rows removed.
pub async fn run(
    conn: &mut PgConnection,
    plan: &[CascadeStep],
    id: i64,
) -> Result<u64, sqlx::Error> {
    let mut total = 0;
    for step in plan {
        let removed = sqlx::query(step.sql)
            .bind(id)
            .execute(&mut *conn)
            .await?
            .rows_affected();
        if removed > 0 {
            tracing::debug!(table = step.table, id, removed, "Cascade delete");
        }
        total += removed;
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA: &str = include_str!("../../migrations/0001_initial.sql");

    /// Tables whose definition contains `REFERENCES <target>`
    fn tables_referencing(target: &str) -> Vec<String> {
        let needle = format!("REFERENCES {target} ");
        SCHEMA
            .split("CREATE TABLE ")
            .skip(1)
            .filter(|block| {
                let body = block.split(';').next().unwrap_or_default();
                body.contains(&needle)
            })
            .filter_map(|block| block.split_whitespace().next().map(str::to_string))
            .collect()
    }

    fn position(plan: &[CascadeStep], table: &str) -> usize {
        plan.iter()
            .position(|s| s.table == table)
            .unwrap_or_else(|| panic!("{table} missing from cascade plan"))
    }

    #[test]
    fn test_schema_parse_finds_dependents() {
        let deps = tables_referencing("businesses");
        assert!(deps.contains(&"admins".to_string()));
        assert!(deps.contains(&"terminals".to_string()));
        assert!(!deps.contains(&"customers".to_string()));
    }

    #[test]
    fn test_business_plan_covers_every_dependent_table() {
        for table in tables_referencing("businesses") {
            position(BUSINESS_CASCADE, &table);
        }
    }

    #[test]
    fn test_customer_plan_covers_every_dependent_table() {
        for table in tables_referencing("customers") {
            position(CUSTOMER_CASCADE, &table);
        }
    }

    #[test]
    fn test_plans_delete_leaves_first() {
        for plan in [BUSINESS_CASCADE, CUSTOMER_CASCADE] {
            // reviews -> transactions
            assert!(position(plan, "reviews") < position(plan, "transactions"));
        }
        // participations -> campaigns, refresh_tokens looks up admins
        assert!(
            position(BUSINESS_CASCADE, "participations") < position(BUSINESS_CASCADE, "campaigns")
        );
        assert!(position(BUSINESS_CASCADE, "refresh_tokens") < position(BUSINESS_CASCADE, "admins"));
    }

    #[test]
    fn test_every_step_is_parameterized_delete() {
        for step in BUSINESS_CASCADE.iter().chain(CUSTOMER_CASCADE) {
            assert!(step.sql.starts_with(&format!("DELETE FROM {} ", step.table)));
            assert!(step.sql.contains("$1"));
        }
    }
}
