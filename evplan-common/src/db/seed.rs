//! Fixed sample rows for demos and local testing

use super::close_quietly;
use super::manager::DatabaseManager;
use super::models::{NewModerator, NewParticipant};
use crate::{Error, Result};
use sqlx::{Connection, SqliteConnection};
use tracing::info;

/// Rows written by [`seed_sample_data`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub moderators: usize,
    pub participants: usize,
}

pub fn sample_moderators() -> Vec<NewModerator> {
    [
        (
            "Jai Kumar",
            "Hyderabad",
            "Experienced technical event moderator with 10+ years",
            "jai.kumar@example.com",
            "+91-9876543210",
            "Technical, AI/ML, Cloud Computing",
        ),
        (
            "Priya Sharma",
            "Bangalore",
            "Expert in corporate events and team building activities",
            "priya.sharma@example.com",
            "+91-9876543211",
            "Corporate, Team Building, Leadership",
        ),
        (
            "Rahul Verma",
            "Mumbai",
            "Specialist in tech conferences and workshops",
            "rahul.verma@example.com",
            "+91-9876543212",
            "Conferences, Workshops, Technology",
        ),
        (
            "Anita Desai",
            "Delhi",
            "Professional moderator for academic and research events",
            "anita.desai@example.com",
            "+91-9876543213",
            "Academic, Research, Science",
        ),
        (
            "Vikram Singh",
            "Chennai",
            "Creative events and cultural program coordinator",
            "vikram.singh@example.com",
            "+91-9876543214",
            "Cultural, Creative, Entertainment",
        ),
    ]
    .into_iter()
    .map(|(name, city, description, email, phone, expertise)| NewModerator {
        name: name.to_string(),
        city: Some(city.to_string()),
        description: Some(description.to_string()),
        email: Some(email.to_string()),
        phone: Some(phone.to_string()),
        expertise: Some(expertise.to_string()),
    })
    .collect()
}

pub fn sample_participants() -> Vec<NewParticipant> {
    [
        ("Alice Smith", "alice.smith@techcorp.com", "TechCorp", "Software Engineer", "+1-555-0101"),
        (
            "Bob Johnson",
            "bob.johnson@innovate.com",
            "Innovate Inc",
            "Product Manager",
            "+1-555-0102",
        ),
        (
            "Carol White",
            "carol.white@datalytics.com",
            "DataLytics",
            "Data Scientist",
            "+1-555-0103",
        ),
        ("David Brown", "david.brown@cloudnet.com", "CloudNet", "DevOps Engineer", "+1-555-0104"),
        ("Emma Davis", "emma.davis@aitech.com", "AI Tech", "ML Engineer", "+1-555-0105"),
        ("Frank Miller", "frank.miller@startup.io", "StartupIO", "CTO", "+1-555-0106"),
        ("Grace Lee", "grace.lee@enterprise.com", "Enterprise Co", "Architect", "+1-555-0107"),
        (
            "Henry Wilson",
            "henry.wilson@solutions.com",
            "Solutions Ltd",
            "Consultant",
            "+1-555-0108",
        ),
        (
            "Iris Taylor",
            "iris.taylor@innovation.com",
            "Innovation Labs",
            "Researcher",
            "+1-555-0109",
        ),
        ("Jack Anderson", "jack.anderson@digital.com", "Digital Corp", "Team Lead", "+1-555-0110"),
    ]
    .into_iter()
    .map(|(name, email, company, role, phone)| NewParticipant {
        name: name.to_string(),
        email: email.to_string(),
        company: Some(company.to_string()),
        role: Some(role.to_string()),
        phone: Some(phone.to_string()),
    })
    .collect()
}

/// Insert the sample moderators and participants in one transaction.
///
/// Seeding an already-seeded store hits the participant email constraint;
/// the whole seed is then rolled back and [`Error::DuplicateKey`] returned.
pub async fn seed_sample_data(manager: &DatabaseManager) -> Result<SeedSummary> {
    let mut conn = manager.connect().await?;
    let result = insert_samples(&mut conn).await;
    close_quietly(conn).await;

    let summary = result?;
    info!(
        "Seeded {} sample moderators and {} sample participants",
        summary.moderators, summary.participants
    );
    Ok(summary)
}

async fn insert_samples(conn: &mut SqliteConnection) -> Result<SeedSummary> {
    let moderators = sample_moderators();
    let participants = sample_participants();

    let mut tx = conn.begin().await?;

    for m in &moderators {
        sqlx::query(
            r#"
            INSERT INTO moderators (name, city, description, email, phone, expertise)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(m.name.as_str())
        .bind(m.city.as_deref())
        .bind(m.description.as_deref())
        .bind(m.email.as_deref())
        .bind(m.phone.as_deref())
        .bind(m.expertise.as_deref())
        .execute(&mut *tx)
        .await?;
    }

    for p in &participants {
        sqlx::query(
            r#"
            INSERT INTO participants (name, email, company, role, phone)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(p.name.as_str())
        .bind(p.email.as_str())
        .bind(p.company.as_deref())
        .bind(p.role.as_deref())
        .bind(p.phone.as_deref())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            Error::from_insert(e, format!("participant with email {} already exists", p.email))
        })?;
    }

    tx.commit().await?;

    Ok(SeedSummary {
        moderators: moderators.len(),
        participants: participants.len(),
    })
}
