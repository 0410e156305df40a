use sqlx::SqlitePool;

const SQL_CREATE_RESTROOMS: &str = r#"
CREATE TABLE IF NOT EXISTS restrooms (
  id TEXT PRIMARY KEY NOT NULL,
  name TEXT NOT NULL,
  building_name TEXT NOT NULL,
  floor TEXT NOT NULL,
  latitude REAL NOT NULL,
  longitude REAL NOT NULL,
  is_wheelchair_accessible INTEGER NOT NULL DEFAULT 0,
  is_gender_neutral INTEGER NOT NULL DEFAULT 0,
  requires_wildcard INTEGER NOT NULL DEFAULT 0,
  photo_urls TEXT,
  accessibility_notes TEXT,
  hours TEXT,
  wildcard_hours TEXT,
  indoor_directions TEXT,
  status TEXT NOT NULL DEFAULT 'open',
  last_updated TEXT NOT NULL
)
"#;

const SQL_CREATE_REVIEWS: &str = r#"
CREATE TABLE IF NOT EXISTS reviews (
  id TEXT PRIMARY KEY NOT NULL,
  restroom_id TEXT NOT NULL REFERENCES restrooms(id),
  user_id TEXT NOT NULL,
  user_name TEXT NOT NULL,
  rating TEXT NOT NULL,
  comment TEXT,
  created_at TEXT NOT NULL,
  flags INTEGER NOT NULL DEFAULT 0
)
"#;

const SQL_CREATE_ISSUES: &str = r#"
CREATE TABLE IF NOT EXISTS issues (
  id TEXT PRIMARY KEY NOT NULL,
  restroom_id TEXT NOT NULL REFERENCES restrooms(id),
  description TEXT NOT NULL,
  is_resolved INTEGER NOT NULL DEFAULT 0,
  created_at TEXT NOT NULL
)
"#;

const SQL_CREATE_INDEXES: [&str; 2] = [
    "CREATE INDEX IF NOT EXISTS idx_reviews_restroom ON reviews (restroom_id)",
    "CREATE INDEX IF NOT EXISTS idx_issues_restroom ON issues (restroom_id)",
];

pub async fn ensure_schema(pool: &SqlitePool) -> sqlx::Result<()> {
    for sql in [SQL_CREATE_RESTROOMS, SQL_CREATE_REVIEWS, SQL_CREATE_ISSUES]
        .into_iter()
        .chain(SQL_CREATE_INDEXES)
    {
        sqlx::query(sql).execute(pool).await?;
    }
    Ok(())
}
