use chrono::{NaiveDate, NaiveDateTime, Utc};
use rusqlite::{params, Connection};

use crate::models::{Appointment, AppointmentStatus, Category, ContactMessage, Role, User};

// ── Users ──

pub fn insert_user(conn: &Connection, user: &User) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO users (id, name, email, role) VALUES (?1, ?2, ?3, ?4)",
        params![user.id, user.name, user.email, user.role.as_str()],
    )?;
    Ok(())
}

pub fn count_users(conn: &Connection) -> anyhow::Result<i64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
    Ok(count)
}

pub fn get_user_by_email(conn: &Connection, email: &str) -> anyhow::Result<Option<User>> {
    let result = conn.query_row(
        "SELECT id, name, email, role FROM users WHERE email = ?1",
        params![email],
        parse_user_row,
    );

    match result {
        Ok(user) => Ok(Some(user)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn parse_user_row(row: &rusqlite::Row) -> rusqlite::Result<User> {
    let role: String = row.get(3)?;
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        role: Role::parse(&role),
    })
}

// ── Sessions ──

pub fn create_session(conn: &Connection, user_id: &str) -> anyhow::Result<String> {
    let token = uuid::Uuid::new_v4().to_string();
    conn.execute(
        "INSERT INTO sessions (token, user_id) VALUES (?1, ?2)",
        params![token, user_id],
    )?;
    Ok(token)
}

pub fn get_session_user(conn: &Connection, token: &str) -> anyhow::Result<Option<User>> {
    let result = conn.query_row(
        "SELECT u.id, u.name, u.email, u.role
         FROM sessions s
         INNER JOIN users u ON u.id = s.user_id
         WHERE s.token = ?1",
        params![token],
        parse_user_row,
    );

    match result {
        Ok(user) => Ok(Some(user)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

// ── Appointments ──

pub fn create_appointment(conn: &Connection, appointment: &Appointment) -> anyhow::Result<()> {
    let date = appointment.date.format("%Y-%m-%d").to_string();
    let created_at = appointment
        .created_at
        .format("%Y-%m-%d %H:%M:%S")
        .to_string();

    conn.execute(
        "INSERT INTO appointments (id, user_id, date, time, category, status, notes, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            appointment.id,
            appointment.user_id,
            date,
            appointment.time,
            appointment.category.as_str(),
            appointment.status.as_str(),
            appointment.notes,
            created_at,
        ],
    )?;
    Ok(())
}

pub fn get_appointment_by_id(conn: &Connection, id: &str) -> anyhow::Result<Option<Appointment>> {
    let result = conn.query_row(
        "SELECT id, user_id, date, time, category, status, notes, created_at
         FROM appointments WHERE id = ?1",
        params![id],
        |row| Ok(parse_appointment_row(row)),
    );

    match result {
        Ok(appointment) => Ok(Some(appointment?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// The only write path for an appointment's status. Returns false when the
/// id matches no row.
pub fn update_appointment_status(
    conn: &Connection,
    id: &str,
    status: &AppointmentStatus,
) -> anyhow::Result<bool> {
    let count = conn.execute(
        "UPDATE appointments SET status = ?1 WHERE id = ?2",
        params![status.as_str(), id],
    )?;
    Ok(count > 0)
}

pub struct AppointmentWithOwner {
    pub appointment: Appointment,
    pub owner_name: String,
    pub owner_email: String,
}

pub fn list_all_appointments(conn: &Connection) -> anyhow::Result<Vec<AppointmentWithOwner>> {
    let mut stmt = conn.prepare(
        "SELECT a.id, a.user_id, a.date, a.time, a.category, a.status, a.notes, a.created_at,
                u.name, u.email
         FROM appointments a
         INNER JOIN users u ON u.id = a.user_id
         ORDER BY a.date DESC, a.created_at DESC",
    )?;

    let rows = stmt.query_map([], |row| Ok(parse_appointment_with_owner(row)))?;

    let mut appointments = vec![];
    for row in rows {
        appointments.push(row??);
    }
    Ok(appointments)
}

pub fn list_appointments_for_owner(
    conn: &Connection,
    user_id: &str,
) -> anyhow::Result<Vec<AppointmentWithOwner>> {
    let mut stmt = conn.prepare(
        "SELECT a.id, a.user_id, a.date, a.time, a.category, a.status, a.notes, a.created_at,
                u.name, u.email
         FROM appointments a
         INNER JOIN users u ON u.id = a.user_id
         WHERE a.user_id = ?1
         ORDER BY a.date DESC, a.created_at DESC",
    )?;

    let rows = stmt.query_map(params![user_id], |row| Ok(parse_appointment_with_owner(row)))?;

    let mut appointments = vec![];
    for row in rows {
        appointments.push(row??);
    }
    Ok(appointments)
}

fn parse_appointment_row(row: &rusqlite::Row) -> anyhow::Result<Appointment> {
    let id: String = row.get(0)?;
    let user_id: String = row.get(1)?;
    let date_str: String = row.get(2)?;
    let time: String = row.get(3)?;
    let category_str: String = row.get(4)?;
    let status_str: String = row.get(5)?;
    let notes: String = row.get(6)?;
    let created_at_str: String = row.get(7)?;

    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
        .map_err(|_| anyhow::anyhow!("malformed date in appointment {id}: {date_str}"))?;
    let category = Category::parse(&category_str)
        .ok_or_else(|| anyhow::anyhow!("unknown category in appointment {id}: {category_str}"))?;
    let created_at = NaiveDateTime::parse_from_str(&created_at_str, "%Y-%m-%d %H:%M:%S")
        .unwrap_or_else(|_| Utc::now().naive_utc());

    Ok(Appointment {
        id,
        user_id,
        date,
        time,
        category,
        status: AppointmentStatus::parse(&status_str).unwrap_or(AppointmentStatus::Pending),
        notes,
        created_at,
    })
}

fn parse_appointment_with_owner(row: &rusqlite::Row) -> anyhow::Result<AppointmentWithOwner> {
    let appointment = parse_appointment_row(row)?;
    let owner_name: String = row.get(8)?;
    let owner_email: String = row.get(9)?;

    Ok(AppointmentWithOwner {
        appointment,
        owner_name,
        owner_email,
    })
}

// ── Contact Messages ──

pub fn insert_contact_message(conn: &Connection, message: &ContactMessage) -> anyhow::Result<()> {
    let created_at = message.created_at.format("%Y-%m-%d %H:%M:%S").to_string();

    conn.execute(
        "INSERT INTO contact_messages (id, name, email, subject, message, status, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            message.id,
            message.name,
            message.email,
            message.subject,
            message.message,
            message.status,
            created_at,
        ],
    )?;
    Ok(())
}

pub fn list_contact_messages(conn: &Connection) -> anyhow::Result<Vec<ContactMessage>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, email, subject, message, status, created_at
         FROM contact_messages ORDER BY created_at DESC",
    )?;

    let rows = stmt.query_map([], |row| {
        let created_at_str: String = row.get(6)?;
        Ok(ContactMessage {
            id: row.get(0)?,
            name: row.get(1)?,
            email: row.get(2)?,
            subject: row.get(3)?,
            message: row.get(4)?,
            status: row.get(5)?,
            created_at: NaiveDateTime::parse_from_str(&created_at_str, "%Y-%m-%d %H:%M:%S")
                .unwrap_or_else(|_| Utc::now().naive_utc()),
        })
    })?;

    let mut messages = vec![];
    for row in rows {
        messages.push(row?);
    }
    Ok(messages)
}
