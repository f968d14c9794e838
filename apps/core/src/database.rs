use crate::brain::SentimentResult;
use crate::error::AppError;
use crate::models::{
    AudioTrack, AudioTrackCreate, ChatMessage, GameScore, GameScoreCreate, JournalEntry,
    JournalEntryCreate, MoodEntry, MoodEntryCreate,
};
use crate::stats::DashboardStats;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::types::Json;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, instrument};
use uuid::Uuid;

/// How long a connection waits on a locked database before failing
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Tracks inserted the first time the catalog is listed: (title, url, category, seconds).
const DEFAULT_TRACKS: [(&str, &str, &str, i64); 5] = [
    (
        "Ocean Waves",
        "https://assets.mixkit.co/active_storage/sfx/2393/2393-preview.mp3",
        "nature",
        180,
    ),
    (
        "Rain Sounds",
        "https://assets.mixkit.co/active_storage/sfx/2410/2410-preview.mp3",
        "nature",
        240,
    ),
    (
        "Forest Ambience",
        "https://assets.mixkit.co/active_storage/sfx/2459/2459-preview.mp3",
        "nature",
        200,
    ),
    (
        "Peaceful Piano",
        "https://assets.mixkit.co/active_storage/sfx/2458/2458-preview.mp3",
        "meditation",
        220,
    ),
    (
        "Calm Meditation",
        "https://assets.mixkit.co/active_storage/sfx/2457/2457-preview.mp3",
        "meditation",
        300,
    ),
];

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// Opens the pool and applies the embedded migrations.
///
/// In-memory databases live as long as their connection, so they get a single
/// connection that is never recycled.
pub async fn init_db(database_url: &str) -> Result<SqlitePool, AppError> {
    info!("Initializing database at: {}", database_url);

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .busy_timeout(BUSY_TIMEOUT);

    let pool_options = if is_in_memory(database_url) {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(5)
    };

    let pool = pool_options.connect_with(options).await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    info!("Database initialized and migrations applied.");

    Ok(pool)
}

// --- Mood entries ---

#[instrument(skip(pool, payload, sentiment), fields(mood = %payload.mood))]
pub async fn create_mood_entry(
    pool: &SqlitePool,
    payload: &MoodEntryCreate,
    sentiment: Option<SentimentResult>,
) -> Result<MoodEntry, sqlx::Error> {
    let id = Uuid::new_v4().to_string();

    sqlx::query_as::<_, MoodEntry>(
        r#"
        INSERT INTO mood_entries (id, mood, intensity, note, sentiment, timestamp)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING id, mood, intensity, note, sentiment, timestamp
        "#,
    )
    .bind(&id)
    .bind(&payload.mood)
    .bind(payload.intensity)
    .bind(&payload.note)
    .bind(sentiment.map(Json))
    .bind(Utc::now())
    .fetch_one(pool)
    .await
}

/// Newest first.
pub async fn get_mood_entries(pool: &SqlitePool, limit: i64) -> Result<Vec<MoodEntry>, sqlx::Error> {
    sqlx::query_as::<_, MoodEntry>(
        r#"
        SELECT id, mood, intensity, note, sentiment, timestamp
        FROM mood_entries
        ORDER BY timestamp DESC, rowid DESC
        LIMIT ?
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await
}

/// The newest `limit` entries, returned oldest first.
pub async fn get_mood_history(pool: &SqlitePool, limit: i64) -> Result<Vec<MoodEntry>, sqlx::Error> {
    let mut entries = get_mood_entries(pool, limit).await?;
    entries.reverse();
    Ok(entries)
}

// --- Journal entries ---

#[instrument(skip_all, fields(is_voice = payload.is_voice))]
pub async fn create_journal_entry(
    pool: &SqlitePool,
    payload: &JournalEntryCreate,
    sentiment: SentimentResult,
    supportive_message: &str,
) -> Result<JournalEntry, sqlx::Error> {
    let id = Uuid::new_v4().to_string();

    sqlx::query_as::<_, JournalEntry>(
        r#"
        INSERT INTO journal_entries (id, content, is_voice, tags, sentiment, supportive_message, timestamp)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        RETURNING id, content, is_voice, tags, sentiment, supportive_message, timestamp
        "#,
    )
    .bind(&id)
    .bind(&payload.content)
    .bind(payload.is_voice)
    .bind(Json(&payload.tags))
    .bind(Json(sentiment))
    .bind(supportive_message)
    .bind(Utc::now())
    .fetch_one(pool)
    .await
}

pub async fn get_journal_entries(
    pool: &SqlitePool,
    limit: i64,
) -> Result<Vec<JournalEntry>, sqlx::Error> {
    sqlx::query_as::<_, JournalEntry>(
        r#"
        SELECT id, content, is_voice, tags, sentiment, supportive_message, timestamp
        FROM journal_entries
        ORDER BY timestamp DESC, rowid DESC
        LIMIT ?
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await
}

/// Returns `false` when no entry had that id.
#[instrument(skip(pool))]
pub async fn delete_journal_entry(pool: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM journal_entries WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

// --- Game scores ---

#[instrument(skip(pool, payload), fields(game_type = %payload.game_type))]
pub async fn create_game_score(
    pool: &SqlitePool,
    payload: &GameScoreCreate,
) -> Result<GameScore, sqlx::Error> {
    let id = Uuid::new_v4().to_string();

    sqlx::query_as::<_, GameScore>(
        r#"
        INSERT INTO game_scores (id, game_type, score, duration, completed, timestamp)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING id, game_type, score, duration, completed, timestamp
        "#,
    )
    .bind(&id)
    .bind(&payload.game_type)
    .bind(payload.score)
    .bind(payload.duration)
    .bind(payload.completed)
    .bind(Utc::now())
    .fetch_one(pool)
    .await
}

/// Newest first, optionally restricted to one game type.
pub async fn get_game_scores(
    pool: &SqlitePool,
    game_type: Option<&str>,
    limit: i64,
) -> Result<Vec<GameScore>, sqlx::Error> {
    sqlx::query_as::<_, GameScore>(
        r#"
        SELECT id, game_type, score, duration, completed, timestamp
        FROM game_scores
        WHERE (?1 IS NULL OR game_type = ?1)
        ORDER BY timestamp DESC, rowid DESC
        LIMIT ?2
        "#,
    )
    .bind(game_type)
    .bind(limit)
    .fetch_all(pool)
    .await
}

/// The newest `limit` scores, returned oldest first.
pub async fn get_game_history(pool: &SqlitePool, limit: i64) -> Result<Vec<GameScore>, sqlx::Error> {
    let mut scores = get_game_scores(pool, None, limit).await?;
    scores.reverse();
    Ok(scores)
}

// --- Audio tracks ---

/// Lists stored tracks, seeding the default catalog when the table is empty.
pub async fn get_audio_tracks(pool: &SqlitePool, limit: i64) -> Result<Vec<AudioTrack>, sqlx::Error> {
    let tracks = list_audio_tracks(pool, limit).await?;
    if !tracks.is_empty() {
        return Ok(tracks);
    }

    seed_default_tracks(pool).await?;
    list_audio_tracks(pool, limit).await
}

async fn list_audio_tracks(pool: &SqlitePool, limit: i64) -> Result<Vec<AudioTrack>, sqlx::Error> {
    sqlx::query_as::<_, AudioTrack>(
        r#"
        SELECT id, title, url, category, duration
        FROM audio_tracks
        ORDER BY rowid ASC
        LIMIT ?
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await
}

/// Inserts the defaults in one statement guarded on an empty table, so
/// concurrent first listings seed the catalog exactly once.
async fn seed_default_tracks(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let rows = vec!["(?, ?, ?, ?, ?)"; DEFAULT_TRACKS.len()].join(", ");
    let sql = format!(
        r#"
        INSERT INTO audio_tracks (id, title, url, category, duration)
        SELECT column1, column2, column3, column4, column5
        FROM (VALUES {})
        WHERE NOT EXISTS (SELECT 1 FROM audio_tracks)
        "#,
        rows
    );

    let mut query = sqlx::query(&sql);
    for (title, url, category, duration) in DEFAULT_TRACKS {
        query = query
            .bind(Uuid::new_v4().to_string())
            .bind(title)
            .bind(url)
            .bind(category)
            .bind(duration);
    }

    let inserted = query.execute(pool).await?.rows_affected();
    if inserted > 0 {
        info!("Audio catalog was empty, inserted {} default tracks", inserted);
    }
    Ok(())
}

pub async fn create_audio_track(
    pool: &SqlitePool,
    payload: &AudioTrackCreate,
) -> Result<AudioTrack, sqlx::Error> {
    sqlx::query_as::<_, AudioTrack>(
        r#"
        INSERT INTO audio_tracks (id, title, url, category, duration)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id, title, url, category, duration
        "#,
    )
    .bind(Uuid::new_v4().to_string())
    .bind(&payload.title)
    .bind(&payload.url)
    .bind(&payload.category)
    .bind(payload.duration)
    .fetch_one(pool)
    .await
}

// --- Chat history ---

#[instrument(skip_all)]
pub async fn create_chat_message(
    pool: &SqlitePool,
    message: &str,
    response: &str,
    sentiment: SentimentResult,
) -> Result<ChatMessage, sqlx::Error> {
    let id = Uuid::new_v4().to_string();

    sqlx::query_as::<_, ChatMessage>(
        r#"
        INSERT INTO chat_messages (id, message, response, sentiment, timestamp)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id, message, response, sentiment, timestamp
        "#,
    )
    .bind(&id)
    .bind(message)
    .bind(response)
    .bind(Json(sentiment))
    .bind(Utc::now())
    .fetch_one(pool)
    .await
}

/// Newest first.
pub async fn get_chat_history(
    pool: &SqlitePool,
    limit: i64,
) -> Result<Vec<ChatMessage>, sqlx::Error> {
    sqlx::query_as::<_, ChatMessage>(
        r#"
        SELECT id, message, response, sentiment, timestamp
        FROM chat_messages
        ORDER BY timestamp DESC, rowid DESC
        LIMIT ?
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await
}

// --- Dashboard ---

pub async fn get_dashboard_stats(pool: &SqlitePool) -> Result<DashboardStats, sqlx::Error> {
    let (moods, journals, games, chats, recent_mood) =
        sqlx::query_as::<_, (i64, i64, i64, i64, Option<String>)>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM mood_entries),
                (SELECT COUNT(*) FROM journal_entries),
                (SELECT COUNT(*) FROM game_scores),
                (SELECT COUNT(*) FROM chat_messages),
                (SELECT mood FROM mood_entries ORDER BY timestamp DESC, rowid DESC LIMIT 1)
            "#,
        )
        .fetch_one(pool)
        .await?;

    Ok(DashboardStats {
        total_mood_entries: moods,
        total_journal_entries: journals,
        total_games_played: games,
        total_chat_messages: chats,
        recent_mood,
    })
}
