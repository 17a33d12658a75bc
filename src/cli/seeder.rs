//! Demo data seeding.
//!
//! Students are generated in parallel with Rayon and written through the
//! batch writer, so a seeding run shows the same grouped, failure-tolerant
//! behaviour as any other bulk creation.

use fake::Fake;
use fake::faker::name::en::*;
use rayon::prelude::*;
use std::time::Instant;

use k12_models::{Student, StudentId};
use k12_store::DocumentStore;

use crate::batch::{BatchReport, BatchWriter};
use crate::modules::students::StudentService;

#[derive(Clone, Debug)]
pub struct SeedConfig {
    /// Classes are named "Class 1" through "Class {classes}".
    pub classes: usize,
    pub students_per_class: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            classes: 5,
            students_per_class: 20,
        }
    }
}

impl SeedConfig {
    pub fn new(classes: usize, students_per_class: usize) -> Self {
        Self {
            classes,
            students_per_class,
        }
    }

    pub fn total_students(&self) -> usize {
        self.classes * self.students_per_class
    }
}

pub fn class_name(index: usize) -> String {
    format!("Class {}", index + 1)
}

/// Students for every class, class by class, with roll numbers from 1.
pub fn generate_students(config: &SeedConfig) -> Vec<Student> {
    (0..config.classes)
        .into_par_iter()
        .flat_map_iter(|class_idx| {
            let class_name = class_name(class_idx);
            (0..config.students_per_class).map(move |student_idx| {
                let first: String = FirstName().fake();
                let last: String = LastName().fake();
                Student::new(
                    format!("{} {}", first, last),
                    class_name.clone(),
                    (student_idx + 1).to_string(),
                )
            })
        })
        .collect()
}

pub async fn seed_students<S: DocumentStore>(
    store: &S,
    batch: &BatchWriter,
    config: &SeedConfig,
) -> BatchReport<StudentId> {
    let start_time = Instant::now();

    println!("🌱 Seeding students...");
    println!(
        "   - Classes: {}, Students per class: {}",
        config.classes, config.students_per_class
    );

    let students = generate_students(config);
    let report = StudentService::add_students(store, batch, students).await;

    println!(
        "\n✅ {} in {:?} ({} groups of up to {})",
        report.summary("students"),
        start_time.elapsed(),
        report.group_sizes.len(),
        batch.group_size()
    );
    for failure in &report.failures {
        eprintln!("   ❌ #{}: {}", failure.index, failure.message);
    }

    report
}
