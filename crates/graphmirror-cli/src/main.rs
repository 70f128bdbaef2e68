//! graphmirror CLI
//!
//! - `generate`: introspect a Neo4j database (or load a schema snapshot) and
//!   write Spring Data Neo4j entities and repositories
//! - `schema`: introspect a database and print the inferred schema as JSON

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use graphmirror_codegen::{CollisionPolicy, Generator, GeneratorConfig};
use graphmirror_introspect::{ConnectionConfig, Introspector, Neo4jSource, TypeProbe};
use graphmirror_schema::GraphSchema;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "graphmirror")]
#[command(
    author,
    version,
    about = "Mirror a Neo4j schema into Spring Data Neo4j entities and repositories"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Introspect the database and write entity and repository sources.
    Generate {
        #[command(flatten)]
        connection: ConnectionArgs,
        #[command(flatten)]
        output: OutputArgs,
        /// Generate from a JSON schema snapshot instead of a live database.
        #[arg(long, value_name = "FILE")]
        from_schema: Option<PathBuf>,
    },

    /// Introspect the database and print the inferred schema as JSON.
    Schema {
        #[command(flatten)]
        connection: ConnectionArgs,
        /// Write the snapshot to a file instead of stdout.
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct ConnectionArgs {
    /// Bolt URI of the database.
    #[arg(long, env = "NEO4J_URI", default_value = "bolt://localhost:7687")]
    uri: String,
    #[arg(long, env = "NEO4J_USER", default_value = "neo4j")]
    user: String,
    #[arg(long, env = "NEO4J_PASSWORD", default_value = "", hide_env_values = true)]
    password: String,
    /// Database name; the server default when omitted.
    #[arg(long, env = "NEO4J_DATABASE")]
    database: Option<String>,
    /// How property type tags are read from the sampled node.
    #[arg(long, value_enum, default_value_t = ProbeArg::Apoc)]
    type_probe: ProbeArg,
}

impl ConnectionArgs {
    fn config(&self) -> ConnectionConfig {
        ConnectionConfig {
            uri: self.uri.clone(),
            user: self.user.clone(),
            password: self.password.clone(),
            database: self.database.clone(),
            ..ConnectionConfig::default()
        }
    }
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Project directory the source tree is written into.
    #[arg(long, default_value = ".")]
    out_root: PathBuf,
    #[arg(long, default_value = "src/main/java")]
    source_root: PathBuf,
    #[arg(long, default_value = "main.entity")]
    entity_package: String,
    #[arg(long, default_value = "main.repository")]
    repository_package: String,
    /// What to do when two graph names generate the same Java name.
    #[arg(long, value_enum, default_value_t = CollisionArg::Fail)]
    on_collision: CollisionArg,
}

impl OutputArgs {
    fn config(&self) -> GeneratorConfig {
        GeneratorConfig {
            out_root: self.out_root.clone(),
            source_root: self.source_root.clone(),
            entity_package: self.entity_package.clone(),
            repository_package: self.repository_package.clone(),
            on_collision: self.on_collision.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ProbeArg {
    /// `apoc.meta.type` (requires APOC)
    Apoc,
    /// `valueType` (Neo4j 5.13+)
    ValueType,
}

impl From<ProbeArg> for TypeProbe {
    fn from(arg: ProbeArg) -> Self {
        match arg {
            ProbeArg::Apoc => TypeProbe::Apoc,
            ProbeArg::ValueType => TypeProbe::ValueType,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum CollisionArg {
    Fail,
    LastWins,
}

impl From<CollisionArg> for CollisionPolicy {
    fn from(arg: CollisionArg) -> Self {
        match arg {
            CollisionArg::Fail => CollisionPolicy::Fail,
            CollisionArg::LastWins => CollisionPolicy::LastWins,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Commands::Generate {
            connection,
            output,
            from_schema,
        } => cmd_generate(&connection, &output, from_schema.as_deref()),
        Commands::Schema { connection, out } => cmd_schema(&connection, out.as_deref()),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn introspect(connection: &ConnectionArgs) -> Result<GraphSchema> {
    let source = Neo4jSource::connect(&connection.config(), connection.type_probe.into())
        .with_context(|| format!("cannot connect to {}", connection.uri))?;
    let mut introspector = Introspector::new(source);
    introspector
        .introspect()
        .context("schema introspection failed")
}

fn load_schema(path: &Path) -> Result<GraphSchema> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("cannot read schema snapshot {}", path.display()))?;
    let schema: GraphSchema = serde_json::from_str(&text)
        .with_context(|| format!("invalid schema snapshot {}", path.display()))?;
    // Snapshots may have been edited by hand.
    Ok(GraphSchema::new(schema.nodes, schema.relationships))
}

fn cmd_generate(
    connection: &ConnectionArgs,
    output: &OutputArgs,
    from_schema: Option<&Path>,
) -> Result<()> {
    let generator = Generator::new(output.config())?;

    let schema = match from_schema {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading schema snapshot");
            load_schema(path)?
        }
        None => introspect(connection)?,
    };

    let entities = generator
        .generate_entities(&schema)
        .context("entity generation failed")?;
    println!("{}", "Entity generation completed!".green().bold());

    let repositories = generator
        .generate_repositories(&entities.entity_names)
        .context("repository generation failed")?;
    println!("{}", "Repository generation completed!".green().bold());

    eprintln!(
        "{} {} node entities, {} relationship entities, {} repositories under {}",
        "wrote".green().bold(),
        entities.node_paths.len(),
        entities.relationship_paths.len(),
        repositories.len(),
        generator.config().out_root.display().to_string().bold()
    );
    Ok(())
}

fn cmd_schema(connection: &ConnectionArgs, out: Option<&Path>) -> Result<()> {
    let schema = introspect(connection)?;
    let json = serde_json::to_string_pretty(&schema)?;

    match out {
        Some(path) => {
            fs::write(path, format!("{json}\n"))
                .with_context(|| format!("cannot write {}", path.display()))?;
            eprintln!(
                "{} {}",
                "wrote".green().bold(),
                path.display().to_string().bold()
            );
        }
        None => println!("{json}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn generate_flags_build_a_generator_config() {
        let cli = Cli::try_parse_from([
            "graphmirror",
            "generate",
            "--out-root",
            "/tmp/app",
            "--entity-package",
            "com.acme.entity",
            "--on-collision",
            "last-wins",
            "--type-probe",
            "value-type",
            "--uri",
            "bolt://graph:7687",
        ])
        .unwrap();

        let Commands::Generate {
            connection,
            output,
            from_schema,
        } = cli.command
        else {
            panic!("expected generate");
        };
        assert!(from_schema.is_none());

        let config = output.config();
        assert_eq!(config.out_root, PathBuf::from("/tmp/app"));
        assert_eq!(config.source_root, PathBuf::from("src/main/java"));
        assert_eq!(config.entity_package, "com.acme.entity");
        assert_eq!(config.repository_package, "main.repository");
        assert_eq!(config.on_collision, CollisionPolicy::LastWins);

        assert_eq!(connection.config().uri, "bolt://graph:7687");
        assert_eq!(TypeProbe::from(connection.type_probe), TypeProbe::ValueType);
    }

    #[test]
    fn unknown_collision_policy_is_rejected() {
        assert!(Cli::try_parse_from(["graphmirror", "generate", "--on-collision", "merge"]).is_err());
    }

    #[test]
    fn snapshots_are_reordered_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.json");
        fs::write(
            &path,
            r#"{"nodes":[{"label":"PERSON"},{"label":"CITY","properties":{"name":"STRING"}}]}"#,
        )
        .unwrap();

        let schema = load_schema(&path).unwrap();
        let labels: Vec<_> = schema.nodes.iter().map(|n| n.label.as_str()).collect();
        assert_eq!(labels, ["CITY", "PERSON"]);
        assert!(schema.relationships.is_empty());
    }

    #[test]
    fn malformed_snapshot_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{").unwrap();

        let err = load_schema(&path).unwrap_err();
        assert!(format!("{err}").contains("broken.json"));
    }
}
