//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `hr_core` wiring end to end: config, logging, store, service.
//! - Keep output deterministic apart from generated identifiers.

use hr_core::db::open_db;
use hr_core::{
    init_logging, CoreConfig, Employee, HrRepository, HrService, InMemoryHrRepository, Position,
    PositionRepository, RequestContext, SqliteHrRepository,
};
use log::info;
use rust_decimal::Decimal;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    println!("hr_core ping={}", hr_core::ping());
    println!("hr_core version={}", hr_core::core_version());

    let config = CoreConfig::from_env()?;
    if let Some(log_dir) = &config.log_dir {
        init_logging(config.log_level, log_dir)?;
    }

    match &config.db_path {
        Some(path) => {
            let conn = open_db(path)?;
            println!("store=sqlite path={}", path.display());
            smoke(&HrService::new(SqliteHrRepository::new(&conn)))
        }
        None => {
            println!("store=memory");
            smoke(&HrService::new(InMemoryHrRepository::new()))
        }
    }
}

fn smoke<R: HrRepository>(service: &HrService<R>) -> Result<(), Box<dyn Error>> {
    let ctx = RequestContext::correlated();
    info!(
        "event=cli_smoke module=cli status=start correlation_id={}",
        ctx.correlation_id().unwrap_or_default()
    );

    let position = Position::new("smoke-probe", Decimal::new(100_000, 2));
    let position_id = match service.create_position(&ctx, &position) {
        Ok(id) => id,
        // A file store keeps the probe position from earlier runs.
        Err(hr_core::ServiceError::PositionAlreadyExists { .. }) => service
            .repository()
            .positions()?
            .into_iter()
            .find(|existing| existing.same_identity(&position))
            .map(|existing| existing.id.to_string())
            .ok_or("probe position vanished")?,
        Err(err) => return Err(err.into()),
    };
    println!("position id={position_id}");

    let employee = Employee::new("Smoke", "Probe", position_id.parse()?);
    match service.create_employee(&ctx, &employee) {
        Ok(id) => println!("employee id={id}"),
        Err(hr_core::ServiceError::EmployeeAlreadyExists { .. }) => {
            println!("employee already present")
        }
        Err(err) => return Err(err.into()),
    }

    let page = service.list_employees(&ctx, 1, 1)?;
    println!("employees page(limit=1, offset=1) len={}", page.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::smoke;
    use hr_core::{HrService, InMemoryHrRepository, Position, PositionRepository};
    use rust_decimal::Decimal;
    use uuid::Uuid;

    #[test]
    fn rerun_finds_smoke_position_beyond_first_page() {
        let repo = InMemoryHrRepository::new();
        for n in 0..120 {
            let filler = Position::with_id(Uuid::new_v4(), format!("filler-{n}"), Decimal::ONE);
            repo.add_position(&filler).unwrap();
        }
        let service = HrService::new(&repo);

        smoke(&service).unwrap();
        smoke(&service).unwrap();

        let smoke_rows = repo
            .positions()
            .unwrap()
            .into_iter()
            .filter(|position| position.name == "smoke-probe")
            .count();
        assert_eq!(smoke_rows, 1);
    }
}
