use crate::db::models::{ContactInfo, ContactSubmission, Session, SiteSection, Testimonial, User};
use crate::db::schema::SQLITE_INIT;
use crate::error::BrochureError;
use crate::types::requests::{
    ContactForm, ContactInfoBody, SectionBody, TestimonialCreate, TestimonialPatch,
};
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Pool, Row, Sqlite};
use std::str::FromStr;
use uuid::Uuid;

pub type SqlitePool = Pool<Sqlite>;

/// Open (and create if missing) the SQLite database behind `database_url`.
pub async fn connect(database_url: &str) -> Result<SqlitePool, BrochureError> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;
    Ok(pool)
}

#[derive(Clone)]
pub struct SiteStorage {
    pool: SqlitePool,
}

impl SiteStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), BrochureError> {
        // execute multiple statements safely (SQLite supports multi-commands but sqlx::query doesn't)
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    // ---- users ----

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, BrochureError> {
        let row = sqlx::query(
            "SELECT id, username, password_hash, is_admin FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Self::row_to_user).transpose()
    }

    pub async fn create_user(
        &self,
        username: &str,
        password_hash: &str,
        is_admin: bool,
    ) -> Result<User, BrochureError> {
        let user = User {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            is_admin,
        };
        let is_admin_i = if user.is_admin { 1 } else { 0 };
        sqlx::query("INSERT INTO users (id, username, password_hash, is_admin) VALUES (?, ?, ?, ?)")
            .bind(&user.id)
            .bind(&user.username)
            .bind(&user.password_hash)
            .bind(is_admin_i)
            .execute(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn create_admin_user(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<User, BrochureError> {
        self.create_user(username, password_hash, true).await
    }

    // ---- sessions ----

    pub async fn insert_session(&self, session: &Session) -> Result<(), BrochureError> {
        let is_admin_i = if session.is_admin { 1 } else { 0 };
        sqlx::query(
            r#"INSERT INTO sessions (session_id, user_id, username, is_admin, created_at, expires_at)
               VALUES (?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&session.session_id)
        .bind(&session.user_id)
        .bind(&session.username)
        .bind(is_admin_i)
        .bind(session.created_at.to_rfc3339())
        .bind(session.expires_at.to_rfc3339())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn get_session(&self, session_id: &str) -> Result<Option<Session>, BrochureError> {
        let row = sqlx::query(
            r#"SELECT session_id, user_id, username, is_admin, created_at, expires_at
               FROM sessions WHERE session_id = ?"#,
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Self::row_to_session).transpose()
    }

    pub async fn extend_session(
        &self,
        session_id: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), BrochureError> {
        sqlx::query("UPDATE sessions SET expires_at = ? WHERE session_id = ?")
            .bind(expires_at.to_rfc3339())
            .bind(session_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn delete_session(&self, session_id: &str) -> Result<(), BrochureError> {
        sqlx::query("DELETE FROM sessions WHERE session_id = ?")
            .bind(session_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Remove every session whose expiry is behind `cutoff`. Returns the
    /// number of rows deleted.
    pub async fn delete_expired_sessions(&self, cutoff: DateTime<Utc>) -> Result<u64, BrochureError> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at < ?")
            .bind(cutoff.to_rfc3339())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    // ---- site sections ----

    pub async fn list_sections(&self) -> Result<Vec<SiteSection>, BrochureError> {
        let rows = sqlx::query(
            r#"SELECT key, title, subtitle, content, cta_label, cta_url, metadata, updated_at
               FROM site_sections ORDER BY key"#,
        )
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Self::row_to_section).collect()
    }

    pub async fn get_section(&self, key: &str) -> Result<Option<SiteSection>, BrochureError> {
        let row = sqlx::query(
            r#"SELECT key, title, subtitle, content, cta_label, cta_url, metadata, updated_at
               FROM site_sections WHERE key = ?"#,
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Self::row_to_section).transpose()
    }

    /// Insert the section if the key is new, otherwise update it in
    /// place. Fields absent from `body` keep their stored values.
    pub async fn upsert_section(
        &self,
        key: &str,
        body: &SectionBody,
    ) -> Result<SiteSection, BrochureError> {
        let now = Utc::now();
        let section = match self.get_section(key).await? {
            Some(existing) => SiteSection {
                key: existing.key,
                title: body.title.clone().or(existing.title),
                subtitle: body.subtitle.clone().or(existing.subtitle),
                content: body.content.clone().or(existing.content),
                cta_label: body.cta_label.clone().or(existing.cta_label),
                cta_url: body.cta_url.clone().or(existing.cta_url),
                metadata: body.metadata.clone().or(existing.metadata),
                updated_at: now,
            },
            None => SiteSection {
                key: key.to_string(),
                title: body.title.clone(),
                subtitle: body.subtitle.clone(),
                content: body.content.clone(),
                cta_label: body.cta_label.clone(),
                cta_url: body.cta_url.clone(),
                metadata: body.metadata.clone(),
                updated_at: now,
            },
        };

        let metadata_json = section
            .metadata
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
        sqlx::query(
            r#"
            INSERT INTO site_sections (
                key, title, subtitle, content, cta_label, cta_url, metadata, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET
                title=excluded.title,
                subtitle=excluded.subtitle,
                content=excluded.content,
                cta_label=excluded.cta_label,
                cta_url=excluded.cta_url,
                metadata=excluded.metadata,
                updated_at=excluded.updated_at
            "#,
        )
        .bind(&section.key)
        .bind(&section.title)
        .bind(&section.subtitle)
        .bind(&section.content)
        .bind(&section.cta_label)
        .bind(&section.cta_url)
        .bind(metadata_json)
        .bind(section.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(section)
    }

    // ---- testimonials ----

    pub async fn list_testimonials(&self) -> Result<Vec<Testimonial>, BrochureError> {
        let rows = sqlx::query(
            r#"SELECT id, quote, name, role, company, is_featured, display_order, created_at
               FROM testimonials ORDER BY display_order ASC, created_at ASC"#,
        )
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Self::row_to_testimonial).collect()
    }

    pub async fn get_testimonial(&self, id: &str) -> Result<Option<Testimonial>, BrochureError> {
        let row = sqlx::query(
            r#"SELECT id, quote, name, role, company, is_featured, display_order, created_at
               FROM testimonials WHERE id = ?"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Self::row_to_testimonial).transpose()
    }

    pub async fn create_testimonial(
        &self,
        body: &TestimonialCreate,
    ) -> Result<Testimonial, BrochureError> {
        let testimonial = Testimonial {
            id: Uuid::new_v4().to_string(),
            quote: body.quote.clone(),
            name: body.name.clone(),
            role: body.role.clone(),
            company: body.company.clone(),
            is_featured: body.is_featured,
            display_order: body.display_order,
            created_at: Utc::now(),
        };
        let featured_i = if testimonial.is_featured { 1 } else { 0 };
        sqlx::query(
            r#"INSERT INTO testimonials (id, quote, name, role, company, is_featured, display_order, created_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&testimonial.id)
        .bind(&testimonial.quote)
        .bind(&testimonial.name)
        .bind(&testimonial.role)
        .bind(&testimonial.company)
        .bind(featured_i)
        .bind(testimonial.display_order)
        .bind(testimonial.created_at.to_rfc3339())
        .execute(&self.pool)
        .await?;
        Ok(testimonial)
    }

    /// Apply a partial update. Returns `None` when the id is unknown.
    pub async fn update_testimonial(
        &self,
        id: &str,
        patch: &TestimonialPatch,
    ) -> Result<Option<Testimonial>, BrochureError> {
        let Some(existing) = self.get_testimonial(id).await? else {
            return Ok(None);
        };
        let updated = Testimonial {
            id: existing.id,
            quote: patch.quote.clone().unwrap_or(existing.quote),
            name: patch.name.clone().unwrap_or(existing.name),
            role: patch.role.clone().unwrap_or(existing.role),
            company: patch.company.clone().unwrap_or(existing.company),
            is_featured: patch.is_featured.unwrap_or(existing.is_featured),
            display_order: patch.display_order.unwrap_or(existing.display_order),
            created_at: existing.created_at,
        };
        let featured_i = if updated.is_featured { 1 } else { 0 };
        sqlx::query(
            r#"UPDATE testimonials
               SET quote = ?, name = ?, role = ?, company = ?, is_featured = ?, display_order = ?
               WHERE id = ?"#,
        )
        .bind(&updated.quote)
        .bind(&updated.name)
        .bind(&updated.role)
        .bind(&updated.company)
        .bind(featured_i)
        .bind(updated.display_order)
        .bind(&updated.id)
        .execute(&self.pool)
        .await?;
        Ok(Some(updated))
    }

    /// Deleting an unknown id is a no-op, not an error.
    pub async fn delete_testimonial(&self, id: &str) -> Result<(), BrochureError> {
        sqlx::query("DELETE FROM testimonials WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    // ---- contact info ----

    pub async fn get_contact_info(&self) -> Result<Option<ContactInfo>, BrochureError> {
        let row = sqlx::query(
            r#"SELECT id, headline, description, phone, email, support_email, address, office_hours, updated_at
               FROM contact_info WHERE id = 1"#,
        )
        .fetch_optional(&self.pool)
        .await?;
        row.map(Self::row_to_contact_info).transpose()
    }

    /// Write the singleton row. The fixed primary key makes this a plain
    /// upsert with no read-modify-write race; each call replaces all
    /// fields with the supplied payload.
    pub async fn upsert_contact_info(
        &self,
        body: &ContactInfoBody,
    ) -> Result<ContactInfo, BrochureError> {
        let now = Utc::now();
        sqlx::query(
            r#"
            INSERT INTO contact_info (
                id, headline, description, phone, email, support_email, address, office_hours, updated_at
            ) VALUES (1, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                headline=excluded.headline,
                description=excluded.description,
                phone=excluded.phone,
                email=excluded.email,
                support_email=excluded.support_email,
                address=excluded.address,
                office_hours=excluded.office_hours,
                updated_at=excluded.updated_at
            "#,
        )
        .bind(&body.headline)
        .bind(&body.description)
        .bind(&body.phone)
        .bind(&body.email)
        .bind(&body.support_email)
        .bind(&body.address)
        .bind(&body.office_hours)
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(ContactInfo {
            id: 1,
            headline: body.headline.clone(),
            description: body.description.clone(),
            phone: body.phone.clone(),
            email: body.email.clone(),
            support_email: body.support_email.clone(),
            address: body.address.clone(),
            office_hours: body.office_hours.clone(),
            updated_at: now,
        })
    }

    // ---- contact submissions ----

    pub async fn create_submission(
        &self,
        form: &ContactForm,
    ) -> Result<ContactSubmission, BrochureError> {
        let submission = ContactSubmission {
            id: Uuid::new_v4().to_string(),
            name: form.name.clone(),
            email: form.email.clone(),
            company: form.company.clone(),
            service_interest: form.service_interest.clone(),
            message: form.message.clone(),
            submitted_at: Utc::now(),
        };
        sqlx::query(
            r#"INSERT INTO contact_submissions (id, name, email, company, service_interest, message, submitted_at)
               VALUES (?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&submission.id)
        .bind(&submission.name)
        .bind(&submission.email)
        .bind(&submission.company)
        .bind(&submission.service_interest)
        .bind(&submission.message)
        .bind(submission.submitted_at.to_rfc3339())
        .execute(&self.pool)
        .await?;
        Ok(submission)
    }

    /// Newest first.
    pub async fn list_submissions(&self) -> Result<Vec<ContactSubmission>, BrochureError> {
        let rows = sqlx::query(
            r#"SELECT id, name, email, company, service_interest, message, submitted_at
               FROM contact_submissions ORDER BY submitted_at DESC"#,
        )
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Self::row_to_submission).collect()
    }

    // ---- row mapping ----

    fn row_to_user(row: SqliteRow) -> Result<User, BrochureError> {
        let is_admin_i: i64 = row.try_get("is_admin")?;
        Ok(User {
            id: row.try_get("id")?,
            username: row.try_get("username")?,
            password_hash: row.try_get("password_hash")?,
            is_admin: is_admin_i != 0,
        })
    }

    fn row_to_session(row: SqliteRow) -> Result<Session, BrochureError> {
        let is_admin_i: i64 = row.try_get("is_admin")?;
        let created_at: String = row.try_get("created_at")?;
        let expires_at: String = row.try_get("expires_at")?;
        Ok(Session {
            session_id: row.try_get("session_id")?,
            user_id: row.try_get("user_id")?,
            username: row.try_get("username")?,
            is_admin: is_admin_i != 0,
            created_at: Self::parse_timestamp(&created_at)?,
            expires_at: Self::parse_timestamp(&expires_at)?,
        })
    }

    fn row_to_section(row: SqliteRow) -> Result<SiteSection, BrochureError> {
        let metadata_json: Option<String> = row.try_get("metadata")?;
        let metadata = match metadata_json {
            Some(s) => {
                Some(serde_json::from_str(&s).map_err(|e| sqlx::Error::Decode(Box::new(e)))?)
            }
            None => None,
        };
        let updated_at: String = row.try_get("updated_at")?;
        Ok(SiteSection {
            key: row.try_get("key")?,
            title: row.try_get("title")?,
            subtitle: row.try_get("subtitle")?,
            content: row.try_get("content")?,
            cta_label: row.try_get("cta_label")?,
            cta_url: row.try_get("cta_url")?,
            metadata,
            updated_at: Self::parse_timestamp(&updated_at)?,
        })
    }

    fn row_to_testimonial(row: SqliteRow) -> Result<Testimonial, BrochureError> {
        let featured_i: i64 = row.try_get("is_featured")?;
        let created_at: String = row.try_get("created_at")?;
        Ok(Testimonial {
            id: row.try_get("id")?,
            quote: row.try_get("quote")?,
            name: row.try_get("name")?,
            role: row.try_get("role")?,
            company: row.try_get("company")?,
            is_featured: featured_i != 0,
            display_order: row.try_get("display_order")?,
            created_at: Self::parse_timestamp(&created_at)?,
        })
    }

    fn row_to_contact_info(row: SqliteRow) -> Result<ContactInfo, BrochureError> {
        let updated_at: String = row.try_get("updated_at")?;
        Ok(ContactInfo {
            id: row.try_get("id")?,
            headline: row.try_get("headline")?,
            description: row.try_get("description")?,
            phone: row.try_get("phone")?,
            email: row.try_get("email")?,
            support_email: row.try_get("support_email")?,
            address: row.try_get("address")?,
            office_hours: row.try_get("office_hours")?,
            updated_at: Self::parse_timestamp(&updated_at)?,
        })
    }

    fn row_to_submission(row: SqliteRow) -> Result<ContactSubmission, BrochureError> {
        let submitted_at: String = row.try_get("submitted_at")?;
        Ok(ContactSubmission {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            company: row.try_get("company")?,
            service_interest: row.try_get("service_interest")?,
            message: row.try_get("message")?,
            submitted_at: Self::parse_timestamp(&submitted_at)?,
        })
    }

    fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, BrochureError> {
        let parsed = DateTime::parse_from_rfc3339(value)
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
        Ok(parsed.with_timezone(&Utc))
    }
}
