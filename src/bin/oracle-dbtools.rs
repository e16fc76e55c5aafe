//! oracle-dbtools CLI
//!
//! Build-step runner for the Oracle command line utilities: data-pump
//! export/import and SQL*Plus.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use oracle_dbtools::tools::sqlplus::DEFAULT_BEFORE_SQL;
use oracle_dbtools::{
    ConnectionSettings, ConsoleSink, DatapumpOptions, DbTaskRunner, DbTool, ExpdpTool, ImpdpTool,
    LogSink, ServerStore, SqlPlusTool,
};
use std::path::PathBuf;
use std::process;

/// Build-step runner for Oracle command line utilities
#[derive(Parser)]
#[command(name = "oracle-dbtools")]
#[command(version = "0.1.0")]
#[command(about = "Runs expdp, impdp and sqlplus on behalf of an automated build", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Connection and credential parameters shared by all subcommands
#[derive(Args)]
struct ConnectionArgs {
    /// User name for the database
    #[arg(long)]
    username: Option<String>,

    /// Password for the database
    #[arg(long)]
    password: Option<String>,

    /// Use credentials from this entry in the server store instead of
    /// --username/--password
    #[arg(long = "server-id")]
    server_id: Option<String>,

    /// YAML file with named server credentials
    #[arg(long)]
    servers: Option<PathBuf>,

    /// Host name of the database server
    #[arg(long, default_value = "localhost")]
    hostname: String,

    /// Port of the database server
    #[arg(long, default_value_t = 1521)]
    port: u16,

    /// Service name of the database instance
    #[arg(long = "service-name")]
    service_name: String,

    /// Instance name, for RAC databases with multiple instances
    #[arg(long = "instance-name")]
    instance_name: Option<String>,

    /// Role for the AS clause (SYSDBA or SYSOPER; other values are ignored)
    #[arg(long = "as-clause")]
    as_clause: Option<String>,

    /// Use the Easy Connect identifier form instead of the full descriptor
    #[arg(long = "easy-connect")]
    easy_connect: bool,

    /// Log a warning instead of failing when the tool exits non-zero
    #[arg(long = "no-fail-on-error")]
    no_fail_on_error: bool,
}

impl ConnectionArgs {
    fn settings(&self) -> ConnectionSettings {
        ConnectionSettings {
            username: self.username.clone(),
            password: self.password.clone(),
            server_id: self.server_id.clone(),
            hostname: self.hostname.clone(),
            port: self.port,
            service_name: self.service_name.clone(),
            instance_name: self.instance_name.clone(),
            as_clause: self.as_clause.clone(),
            use_easy_connect: self.easy_connect,
        }
    }

    async fn server_store(&self) -> Result<ServerStore> {
        match &self.servers {
            Some(path) => Ok(ServerStore::load(path).await?),
            None => Ok(ServerStore::empty()),
        }
    }
}

/// Data-pump options shared by expdp and impdp
#[derive(Args)]
struct DatapumpArgs {
    /// Filter what is loaded/unloaded (ALL | DATA_ONLY | METADATA_ONLY)
    #[arg(long)]
    content: Option<String>,

    /// Directory object for the dump file set and log/SQL files
    #[arg(long)]
    directory: Option<String>,

    /// Names of the dump file set
    #[arg(long)]
    dumpfile: Option<String>,

    /// Objects and object types to exclude
    #[arg(long)]
    exclude: Option<String>,

    /// Objects and object types to include
    #[arg(long)]
    include: Option<String>,

    /// Log file name
    #[arg(long)]
    logfile: Option<String>,

    /// Timestamp job messages (NONE | STATUS | LOGFILE | ALL)
    #[arg(long)]
    logtime: Option<String>,

    /// Database link for a network operation
    #[arg(long = "network-link")]
    network_link: Option<String>,

    /// Schema-mode operation over the named schemas
    #[arg(long)]
    schemas: Option<String>,

    /// Table-mode operation over the named tables
    #[arg(long)]
    tables: Option<String>,
}

impl DatapumpArgs {
    fn options(&self) -> DatapumpOptions {
        DatapumpOptions {
            content: self.content.clone(),
            directory: self.directory.clone(),
            dumpfile: self.dumpfile.clone(),
            exclude: self.exclude.clone(),
            include: self.include.clone(),
            logfile: self.logfile.clone(),
            logtime: self.logtime.clone(),
            network_link: self.network_link.clone(),
            schemas: self.schemas.clone(),
            tables: self.tables.clone(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run a data-pump export
    Expdp {
        #[command(flatten)]
        connection: ConnectionArgs,

        #[command(flatten)]
        datapump: DatapumpArgs,

        /// The expdp command to execute
        #[arg(long, default_value = "expdp")]
        executable: String,

        /// Metadata compression (METADATA_ONLY | NONE)
        #[arg(long)]
        compression: Option<String>,

        /// Overwrite the destination dump file if it exists
        #[arg(long = "reuse-dumpfiles")]
        reuse_dumpfiles: bool,
    },

    /// Run a data-pump import
    Impdp {
        #[command(flatten)]
        connection: ConnectionArgs,

        #[command(flatten)]
        datapump: DatapumpArgs,

        /// The impdp command to execute
        #[arg(long, default_value = "impdp")]
        executable: String,

        /// Remap source tablespace to target tablespace
        #[arg(long = "remap-tablespace")]
        remap_tablespace: Option<String>,

        /// Load source schema objects into a target schema
        #[arg(long = "remap-schema")]
        remap_schema: Option<String>,

        /// Behavior for pre-existing tables (SKIP | APPEND | TRUNCATE | REPLACE)
        #[arg(long = "table-exists-action")]
        table_exists_action: Option<String>,
    },

    /// Run a script or SQL snippet through SQL*Plus
    Sqlplus {
        #[command(flatten)]
        connection: ConnectionArgs,

        /// The sqlplus command to execute
        #[arg(long, default_value = "sqlplus")]
        executable: String,

        /// Statements executed directly after sqlplus starts
        #[arg(long = "before-sql", default_value = DEFAULT_BEFORE_SQL)]
        before_sql: String,

        /// Skip the before-sql statements entirely
        #[arg(long = "no-before-sql")]
        no_before_sql: bool,

        /// SQL to execute, written to a temporary script file
        #[arg(long = "sql-command")]
        sql_command: Option<String>,

        /// Existing script file to execute
        #[arg(long = "sql-file")]
        sql_file: Option<PathBuf>,

        /// Positional parameters passed on to the script
        #[arg(value_name = "SCRIPT_ARG", trailing_var_arg = true)]
        arguments: Vec<String>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let sink = ConsoleSink::new();

    if let Err(error) = run(cli, &sink).await {
        sink.error(&format!("{error:#}"));
        process::exit(1);
    }
}

async fn run(cli: Cli, sink: &dyn LogSink) -> Result<()> {
    match cli.command {
        Commands::Expdp {
            connection,
            datapump,
            executable,
            compression,
            reuse_dumpfiles,
        } => {
            let tool = ExpdpTool {
                executable,
                common: datapump.options(),
                compression,
                reuse_dumpfiles,
            };
            execute(&connection, &tool, sink).await
        }
        Commands::Impdp {
            connection,
            datapump,
            executable,
            remap_tablespace,
            remap_schema,
            table_exists_action,
        } => {
            let tool = ImpdpTool {
                executable,
                common: datapump.options(),
                remap_tablespace,
                remap_schema,
                table_exists_action,
            };
            execute(&connection, &tool, sink).await
        }
        Commands::Sqlplus {
            connection,
            executable,
            before_sql,
            no_before_sql,
            sql_command,
            sql_file,
            arguments,
        } => {
            let tool = SqlPlusTool {
                executable,
                before_sql: if no_before_sql { None } else { Some(before_sql) },
                sql_command,
                sql_file,
                arguments,
            };
            execute(&connection, &tool, sink).await
        }
    }
}

async fn execute(connection: &ConnectionArgs, tool: &dyn DbTool, sink: &dyn LogSink) -> Result<()> {
    let settings = connection.settings();
    let store = connection.server_store().await?;

    DbTaskRunner::new(&settings, &store, sink)
        .fail_on_error(!connection.no_fail_on_error)
        .run(tool)
        .await?;
    Ok(())
}
