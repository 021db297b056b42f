use std::time::Instant;

use anyhow::Result;
use redis_connection::CacheAside;
use task_dao::Stores;
use tracing::{info, instrument, warn};

use crate::{GroupSeeder, ListSeeder, Seeder, TaskSeeder, UserSeeder};

#[derive(Default)]
pub struct SeederRunner {
    seeders: Vec<Box<dyn Seeder>>,
}

impl SeederRunner {
    pub fn new() -> Self { Self::default() }

    /// Users, groups, lists and tasks, in dependency order.
    pub fn task_board(stores: &Stores, cache: &CacheAside) -> Self {
        Self::new()
            .add_seeder(Box::new(UserSeeder::new(
                stores.users.clone(),
                cache.clone(),
            )))
            .add_seeder(Box::new(GroupSeeder::new(
                stores.groups.clone(),
                cache.clone(),
            )))
            .add_seeder(Box::new(ListSeeder::new(
                stores.lists.clone(),
                stores.groups.clone(),
                cache.clone(),
            )))
            .add_seeder(Box::new(TaskSeeder::new(
                stores.tasks.clone(),
                stores.lists.clone(),
                cache.clone(),
            )))
    }

    pub fn add_seeder(mut self, seeder: Box<dyn Seeder>) -> Self {
        self.seeders.push(seeder);
        self
    }

    pub fn len(&self) -> usize { self.seeders.len() }

    pub fn is_empty(&self) -> bool { self.seeders.is_empty() }

    #[instrument(skip(self))]
    pub async fn run_all(&self) -> Result<usize> {
        info!(
            "Starting seeding process for {} seeders",
            self.seeders.len()
        );

        let mut total = 0;
        for seeder in &self.seeders {
            let seeder_start = Instant::now();
            info!("Running seeder: {}", seeder.name());

            match seeder.seed().await {
                Ok(written) => {
                    info!(
                        "Seeder '{}' wrote {} records in {:.2}s",
                        seeder.name(),
                        written,
                        seeder_start.elapsed().as_secs_f64()
                    );
                    total += written;
                }
                Err(e) => {
                    warn!(
                        "Seeder '{}' failed after {:.2}s: {}",
                        seeder.name(),
                        seeder_start.elapsed().as_secs_f64(),
                        e
                    );
                    return Err(e);
                }
            }
        }

        info!("All seeders completed, {} records written", total);
        Ok(total)
    }
}
