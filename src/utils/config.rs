#![forbid(unsafe_code)]

use anyhow::{anyhow, Result};
use fs_mistrust::Mistrust;
use lazy_static::lazy_static;
use log::{error, info};
use serde::Deserialize;
use std::os::unix::fs::PermissionsExt;
use std::{env, fs, path::Path};
use structopt::StructOpt;
use toml;

// Registry Utilities
use crate::utils::{errors::Errors, srv_utils};

use super::srv_utils::get_absolute_path;

// ***************************************************************************
//                                Constants
// ***************************************************************************
// Directory and file locations. Unless otherwise noted, all files and directories
// are relative to the root directory.
const ENV_REGISTRY_ROOT_DIR : &str = "REGISTRY_ROOT_DIR";
const DEFAULT_ROOT_DIR      : &str = "~/.registry_server";
const CONFIG_DIR            : &str = "/config";
const LOGS_DIR              : &str = "/logs";
const LOG4RS_CONFIG_FILE    : &str = "/log4rs.yml";       // relative to config dir
const REGISTRY_CONFIG_FILE  : &str = "/registry.toml";    // relative to config dir

// Networking.
const DEFAULT_HTTP_ADDR     : &str = "http://localhost";
const DEFAULT_HTTP_PORT     : u16  = 3000;

// ***************************************************************************
//                             Static Variables
// ***************************************************************************
// Assign the command line arguments BEFORE RUNTIME_CTX is initialized in main.
lazy_static! {
    pub static ref SRV_ARGS: SrvArgs = init_srv_args();
}

// Calculate the data directories BEFORE RUNTIME_CTX is initialized in main.
lazy_static! {
    pub static ref SRV_DIRS: SrvDirs = init_srv_dirs();
}

// ***************************************************************************
//                             Directory Structs
// ***************************************************************************
// ---------------------------------------------------------------------------
// SrvDirs:
// ---------------------------------------------------------------------------
#[derive(Debug, Deserialize)]
pub struct SrvDirs {
    pub root_dir: String,
    pub config_dir: String,
    pub logs_dir: String,
}

// ***************************************************************************
//                               Config Structs
// ***************************************************************************
// ---------------------------------------------------------------------------
// CommandLineArgs:
// ---------------------------------------------------------------------------
#[derive(Debug, StructOpt)]
#[structopt(name = "registry_args", about = "Command line arguments for the registry server.")]
pub struct SrvArgs {
    /// Specify the server's root data directory.
    ///
    /// This directory contains all the files the server uses during execution.
    #[structopt(short, long)]
    pub root_dir: Option<String>,

    /// Create the data directories and then exit.
    ///
    /// The data directories will be rooted at a root directory calculated
    /// using the following priority order:
    ///
    ///   1. If set, the value of the REGISTRY_ROOT_DIR environment variable,
    ///
    ///   2. Otherwise, if set, the value of the --root-dir command line argument,
    ///
    ///   3. Otherwise, ~/.registry_server
    ///
    #[structopt(short, long)]
    pub create_dirs_only: bool,
}

// ---------------------------------------------------------------------------
// Parms:
// ---------------------------------------------------------------------------
#[derive(Debug)]
#[allow(dead_code)]
pub struct Parms {
    pub config_file: String,
    pub config: Config,
}

// ---------------------------------------------------------------------------
// RuntimeCtx:
// ---------------------------------------------------------------------------
#[derive(Debug)]
#[allow(dead_code)]
pub struct RuntimeCtx {
    pub parms: Parms,
    pub srv_args: &'static SrvArgs,
    pub srv_dirs: &'static SrvDirs,
}

// ---------------------------------------------------------------------------
// Config:
// ---------------------------------------------------------------------------
#[derive(Debug, Deserialize)]
pub struct Config {
    pub title: String,
    pub http_addr: String,
    pub http_port: u16,
}

impl Config {
    pub fn new() -> Self {
        Config::default()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "Registry Server".to_string(),
            http_addr: DEFAULT_HTTP_ADDR.to_string(),
            http_port: DEFAULT_HTTP_PORT,
        }
    }
}

// ***************************************************************************
//                            Directory Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// init_srv_args:
// ---------------------------------------------------------------------------
/** Get the command line arguments. */
fn init_srv_args() -> SrvArgs {
    let args = SrvArgs::from_args();
    println!("{:?}", args);
    args
}

// ---------------------------------------------------------------------------
// init_srv_dirs:
// ---------------------------------------------------------------------------
/** Calculate the external data directories. */
fn init_srv_dirs() -> SrvDirs {
    // Initialize the mistrust object.
    let mistrust = get_mistrust();

    // Check that each path is absolute and is a directory with the
    // proper permission assign if it exists.  If it doesn't exist,
    // create it.
    let root_dir = get_root_dir();
    check_srv_dir(&root_dir, "root directory", &mistrust);

    let config_dir = root_dir.clone() + CONFIG_DIR;
    check_srv_dir(&config_dir, "config directory", &mistrust);

    let logs_dir = root_dir.clone() + LOGS_DIR;
    check_srv_dir(&logs_dir, "logs directory", &mistrust);

    // Package up and return the directories.
    SrvDirs { root_dir, config_dir, logs_dir }
}

// ---------------------------------------------------------------------------
// check_srv_dir:
// ---------------------------------------------------------------------------
/** Check that the path is absolute and, if it exists, that is has the proper
 * permissions assigned.  If it doesn't exist, create it.  The mistrust package
 * creates directories with 0o700 permissions.
 *
 * Any failure results in a panic.
 */
fn check_srv_dir(dir: &String, msgname: &str, mistrust: &Mistrust) {
    // Get the path object.
    let path = Path::new(dir);
    if !path.is_absolute() {
        panic!("The registry {} path must be absolute: {}", msgname, dir);
    }
    if path.exists() {
        // Make sure the path represents a directory.
        if !path.is_dir() {
            panic!("The registry {} path must be a directory: {}", msgname, dir);
        }

        // Make sure the directory had rwx for owner only.
        let meta = path.metadata().unwrap_or_else(|_| panic!("Unable to read metadata for {}: {}", msgname, dir));
        let perm = meta.permissions().mode();
        if perm & 0o777 != 0o700 {
            panic!("The registry {} path must be have 0o700 permissions: {}", msgname, dir);
        }
    } else {
        // Create the directory with the correct permissions.
        match mistrust.make_directory(path) {
            Ok(_) => (),
            Err(e) => {
                panic!("Make directory error for {:?}: {}", path, &e.to_string());
            }
        }
    }
}

// ---------------------------------------------------------------------------
// get_mistrust:
// ---------------------------------------------------------------------------
/** Configure a new mistrust object for initial directory processing. */
fn get_mistrust() -> Mistrust {
    // Configure our mistrust object.
    let mistrust = match Mistrust::builder()
        .ignore_prefix(get_absolute_path("~"))
        .trust_group(0)
        .build() {
            Ok(m) => m,
            Err(e) => {
                panic!("Mistrust configuration error: {}", &e.to_string());
            }
        };
    mistrust
}

// ---------------------------------------------------------------------------
// get_root_dir:
// ---------------------------------------------------------------------------
fn get_root_dir() -> String {
    // Order of precedence:
    //  1. Environment variable
    //  2. Command line --root-dir argument
    //  3. Default location
    //
    let root_dir = env::var(ENV_REGISTRY_ROOT_DIR).unwrap_or_else(
        |_| {
            match SRV_ARGS.root_dir.clone() {
                Some(r) => r,
                None => DEFAULT_ROOT_DIR.to_string(),
            }
        });

    // Canonicalize the path.
    get_absolute_path(&root_dir)
}

// ***************************************************************************
//                               Log Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// init_log:
// ---------------------------------------------------------------------------
pub fn init_log() {
    // Initialize log4rs logging.
    let logconfig = init_log_config();
    match log4rs::init_file(logconfig.clone(), Default::default()) {
        Ok(_) => (),
        Err(e) => {
            println!("{}", e);
            let s = format!("{}", Errors::Log4rsInitialization(logconfig));
            panic!("{}", s);
        },
    }
    info!("Log4rs initialized using: {}", logconfig);
}

// ---------------------------------------------------------------------------
// init_log_config:
// ---------------------------------------------------------------------------
fn init_log_config() -> String {
    SRV_DIRS.config_dir.clone() + LOG4RS_CONFIG_FILE
}

/// ***************************************************************************
//                             Parms Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// get_parms:
// ---------------------------------------------------------------------------
/** Retrieve the application parameters from the configuration file in the
 * config data directory.  If the file cannot be read, default values are
 * used.
 */
fn get_parms() -> Result<Parms> {
    // Get the config file path from its data directory.
    let config_file = SRV_DIRS.config_dir.clone() + REGISTRY_CONFIG_FILE;

    // Read the cofiguration file.
    let config_file_abs = srv_utils::get_absolute_path(&config_file);
    info!("{}", Errors::ReadingConfigFile(config_file_abs.clone()));
    let contents = match fs::read_to_string(&config_file_abs) {
        Ok(c) => c,
        Err(_) => {
            println!("Unable to read configuration at {}. Using default values.", config_file);
            return Ok(Parms { config_file: Default::default(), config: Config::new() });
        }
    };

    // Parse the toml configuration.
    let config : Config = match toml::from_str(&contents) {
        Ok(c)  => c,
        Err(e) => {
            let msg = format!("{}\n   {}", Errors::TOMLParseError(config_file_abs), e);
            error!("{}", msg);
            return Result::Err(anyhow!(msg));
        }
    };

    Ok(Parms { config_file: config_file_abs, config })
}

// ***************************************************************************
//                             Config Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// init_runtime_context:
// ---------------------------------------------------------------------------
pub fn init_runtime_context() -> RuntimeCtx {
    // If this fails the application aborts.
    let parms = get_parms().expect("FAILED to read configuration file.");
    RuntimeCtx { parms, srv_args: &SRV_ARGS, srv_dirs: &SRV_DIRS }
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use crate::utils::config::Config;

    #[test]
    fn print_config() {
        println!("{:?}", Config::new());
    }

    #[test]
    fn default_config_values() {
        let config = Config::new();
        assert_eq!(config.http_port, 3000);
        assert_eq!(config.http_addr, "http://localhost");
    }

    #[test]
    fn config_parses_from_toml() {
        let config: Config = toml::from_str(
            "title = \"Registry Server\"\nhttp_addr = \"http://0.0.0.0\"\nhttp_port = 8080\n",
        )
        .expect("toml parse failed");
        assert_eq!(config.http_port, 8080);
        assert_eq!(config.http_addr, "http://0.0.0.0");
    }
}
