//! Family record command-line surface.
//!
//! Subcommands mirror the managed record operations:
//!
//! ```bash
//! silsilah list
//! silsilah add --id 4 --name Dewi --role ibu --parent1 1
//! silsilah update 4 --name "Dewi Lestari" --parent2 none
//! silsilah delete 4
//! silsilah relationship 1
//! silsilah tree --out family_tree.png
//! ```
//!
//! The collection lives in Firebase when FIREBASE_DATABASE_URL is set and
//! in a local JSON file (FAMILY_FILE, default family.json) otherwise.
//! Every write runs load, mutate, save against one snapshot.

use firebase_rtdb::FirebaseStore;
use quickchart::QuickChart;
use silsilah_core::{
    classify, relation_entries, to_dot, GraphDescription, JsonFileStore, MemberDraft, MemberId,
    MemberUpdate, RecordStore,
};

#[tokio::main]
async fn main() {
    // Load .env file if present
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 || args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return;
    }

    let store = open_store();
    let result = match args[1].as_str() {
        "list" => list(store.as_ref()).await,
        "add" => add(store.as_ref(), &args[2..]).await,
        "update" => update(store.as_ref(), &args[2..]).await,
        "delete" => delete(store.as_ref(), &args[2..]).await,
        "relationship" => relationship(store.as_ref(), &args[2..]).await,
        "tree" => tree(store.as_ref(), &args[2..]).await,
        other => Err(format!("unknown command '{other}', try --help")),
    };

    if let Err(message) = result {
        eprintln!("Error: {message}");
        std::process::exit(1);
    }
}

/// Pick the record store from the environment.
fn open_store() -> Box<dyn RecordStore> {
    match FirebaseStore::from_env() {
        Ok(store) => Box::new(store),
        Err(_) => {
            let path =
                std::env::var("FAMILY_FILE").unwrap_or_else(|_| "family.json".to_string());
            Box::new(JsonFileStore::new(path))
        }
    }
}

async fn list(store: &dyn RecordStore) -> Result<(), String> {
    let family = store.load().await.map_err(|e| e.to_string())?;
    let json = serde_json::to_string_pretty(&family).map_err(|e| e.to_string())?;
    println!("{json}");
    Ok(())
}

async fn add(store: &dyn RecordStore, args: &[String]) -> Result<(), String> {
    let mut draft = MemberDraft::default();
    let mut flags = args.iter();
    while let Some(flag) = flags.next() {
        let value = flags
            .next()
            .ok_or_else(|| format!("missing value for {flag}"))?;
        match flag.as_str() {
            "--id" => draft.id = Some(parse_id(value)?),
            "--name" => draft.name = Some(value.clone()),
            "--role" => draft.role = Some(value.clone()),
            "--parent1" => draft.parent1_id = Some(parse_id(value)?),
            "--parent2" => draft.parent2_id = Some(parse_id(value)?),
            other => return Err(format!("unknown flag '{other}'")),
        }
    }

    let mut family = store.load().await.map_err(|e| e.to_string())?;
    let id = family.add(draft).map_err(|e| e.to_string())?;
    store.save(&family).await.map_err(|e| e.to_string())?;
    println!("Added member {id}");
    Ok(())
}

async fn update(store: &dyn RecordStore, args: &[String]) -> Result<(), String> {
    let id = parse_id(args.first().ok_or("missing member id")?)?;

    let mut patch = MemberUpdate::new();
    let mut flags = args[1..].iter();
    while let Some(flag) = flags.next() {
        let value = flags
            .next()
            .ok_or_else(|| format!("missing value for {flag}"))?;
        match flag.as_str() {
            "--name" => patch = patch.with_name(value.clone()),
            "--role" => patch = patch.with_role(value.clone()),
            "--parent1" => patch = patch.with_parent1(parse_parent(value)?),
            "--parent2" => patch = patch.with_parent2(parse_parent(value)?),
            other => return Err(format!("unknown flag '{other}'")),
        }
    }

    let mut family = store.load().await.map_err(|e| e.to_string())?;
    family.update(id, &patch).map_err(|e| e.to_string())?;
    store.save(&family).await.map_err(|e| e.to_string())?;
    println!("Updated member {id}");
    Ok(())
}

async fn delete(store: &dyn RecordStore, args: &[String]) -> Result<(), String> {
    let id = parse_id(args.first().ok_or("missing member id")?)?;

    let mut family = store.load().await.map_err(|e| e.to_string())?;
    let removed = family.remove(id).map_err(|e| e.to_string())?;
    store.save(&family).await.map_err(|e| e.to_string())?;
    println!("Deleted member {id} ({})", removed.name);
    Ok(())
}

async fn relationship(store: &dyn RecordStore, args: &[String]) -> Result<(), String> {
    let id = parse_id(args.first().ok_or("missing member id")?)?;

    let family = store.load().await.map_err(|e| e.to_string())?;
    let entries = relation_entries(&family, &classify(&family, id));
    let json = serde_json::to_string_pretty(&entries).map_err(|e| e.to_string())?;
    println!("{json}");
    Ok(())
}

async fn tree(store: &dyn RecordStore, args: &[String]) -> Result<(), String> {
    let family = store.load().await.map_err(|e| e.to_string())?;
    let dot = to_dot(&GraphDescription::from_members(&family));

    if args.iter().any(|a| a == "--dot") {
        print!("{dot}");
        return Ok(());
    }

    let out = args
        .iter()
        .position(|a| a == "--out")
        .and_then(|i| args.get(i + 1))
        .cloned()
        .unwrap_or_else(|| "family_tree.png".to_string());

    let renderer = match std::env::var("QUICKCHART_URL") {
        Ok(url) => QuickChart::new().with_base_url(url),
        Err(_) => QuickChart::new(),
    };
    let image = renderer.render(&dot).await.map_err(|e| e.to_string())?;
    tokio::fs::write(&out, image)
        .await
        .map_err(|e| e.to_string())?;
    println!("Wrote {out}");
    Ok(())
}

fn parse_id(value: &str) -> Result<MemberId, String> {
    value
        .parse::<i64>()
        .map(MemberId)
        .map_err(|_| format!("invalid member id '{value}'"))
}

/// Parse a parent flag value: a member id, or "none"/"null" to clear the
/// slot.
fn parse_parent(value: &str) -> Result<Option<MemberId>, String> {
    match value {
        "none" | "null" => Ok(None),
        other => parse_id(other).map(Some),
    }
}

fn print_help() {
    println!("silsilah - family record keeping and tree rendering");
    println!();
    println!("USAGE:");
    println!("  silsilah list                                  Show all members");
    println!("  silsilah add --id N --name X --role Y          Add a member");
    println!("           [--parent1 N] [--parent2 N]");
    println!("  silsilah update <id> [--name X] [--role Y]     Update fields of a member");
    println!("           [--parent1 N|none] [--parent2 N|none]");
    println!("  silsilah delete <id>                           Remove a member");
    println!("  silsilah relationship <id>                     How everyone relates to a member");
    println!("  silsilah tree [--out FILE] [--dot]             Render the family tree");
    println!();
    println!("ENVIRONMENT:");
    println!("  FIREBASE_DATABASE_URL   Store records in Firebase instead of a local file");
    println!("  FIREBASE_AUTH_TOKEN     Auth token for the database, if required");
    println!("  FAMILY_FILE             Local JSON store path (default: family.json)");
    println!("  QUICKCHART_URL          Alternate rendering endpoint");
}
