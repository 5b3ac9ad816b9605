// Runs against a live server when DB_SDL_TEST_URL is set, e.g.
// DB_SDL_TEST_URL="host=/tmp port=5432 user=postgres" cargo test --test postgres
use db_sdl::db::Database;
use db_sdl::schema::{generate_sdl, ForeignKeyRecord};
use tokio_postgres::{Config, NoTls};

fn test_config() -> Option<Config> {
    let url = std::env::var("DB_SDL_TEST_URL").ok()?;
    Some(url.parse().expect("DB_SDL_TEST_URL is not a valid connection string"))
}

async fn admin(config: &Config) -> tokio_postgres::Client {
    let (client, connection) = config.connect(NoTls).await.expect("connect as admin");
    tokio::spawn(async move {
        let _ = connection.await;
    });
    client
}

fn fixture(schema: &str) -> String {
    format!(
        r#"
        DROP SCHEMA IF EXISTS {schema} CASCADE;
        CREATE SCHEMA {schema};
        CREATE TABLE {schema}."user" (id int PRIMARY KEY);
        CREATE TABLE {schema}.shop (id int PRIMARY KEY);
        CREATE TABLE {schema}.car (
            id int PRIMARY KEY,
            owner_id int CONSTRAINT fk_owner REFERENCES {schema}."user" (id)
        );
        CREATE TABLE {schema}.store (
            id int PRIMARY KEY,
            owner_id int CONSTRAINT fk_owner REFERENCES {schema}.shop (id)
        );
        "#
    )
}

fn sorted(mut records: Vec<ForeignKeyRecord>) -> Vec<ForeignKeyRecord> {
    records.sort_by(|a, b| (&a.table, &a.column).cmp(&(&b.table, &b.column)));
    records
}

fn expected_foreign_keys() -> Vec<ForeignKeyRecord> {
    vec![
        ForeignKeyRecord::new("car", "owner_id", "user", "id"),
        ForeignKeyRecord::new("store", "owner_id", "shop", "id"),
    ]
}

#[tokio::test]
async fn constraint_names_shared_across_tables() {
    let Some(config) = test_config() else {
        eprintln!("DB_SDL_TEST_URL not set, skipping");
        return;
    };
    let schema = format!("db_sdl_shared_{}", std::process::id());
    let client = admin(&config).await;
    client.batch_execute(&fixture(&schema)).await.unwrap();

    let db = Database::connect_with(&config, false).await.unwrap();
    let (columns, foreign_keys) = db.fetch_metadata(&schema).await.unwrap();
    let sdl = generate_sdl(&columns, &foreign_keys);

    client
        .batch_execute(&format!("DROP SCHEMA {schema} CASCADE"))
        .await
        .unwrap();

    assert_eq!(sorted(foreign_keys), expected_foreign_keys());
    assert!(sdl.contains("type Car {\n  id: Int!\n  owner_id: User\n}\n"), "{sdl}");
    assert!(sdl.contains("type Store {\n  id: Int!\n  owner_id: Shop\n}\n"), "{sdl}");
}

#[tokio::test]
async fn read_only_role_sees_foreign_keys() {
    let Some(config) = test_config() else {
        eprintln!("DB_SDL_TEST_URL not set, skipping");
        return;
    };
    let pid = std::process::id();
    let schema = format!("db_sdl_reader_{pid}");
    let role = format!("db_sdl_reader_{pid}");
    let client = admin(&config).await;
    client.batch_execute(&fixture(&schema)).await.unwrap();
    client
        .batch_execute(&format!(
            "DROP ROLE IF EXISTS {role};
             CREATE ROLE {role} LOGIN PASSWORD 'reader';
             GRANT USAGE ON SCHEMA {schema} TO {role};
             GRANT SELECT ON ALL TABLES IN SCHEMA {schema} TO {role};"
        ))
        .await
        .unwrap();

    let mut reader = config.clone();
    reader.user(&role).password("reader");
    let db = Database::connect_with(&reader, false).await.unwrap();
    let foreign_keys = db.fetch_foreign_keys(&schema).await.unwrap();
    drop(db);

    client
        .batch_execute(&format!(
            "DROP SCHEMA {schema} CASCADE;
             DROP ROLE {role};"
        ))
        .await
        .unwrap();

    assert_eq!(sorted(foreign_keys), expected_foreign_keys());
}
