pub mod seeder;

pub use seeder::{SeedConfig, generate_students, seed_students};
