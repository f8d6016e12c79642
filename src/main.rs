#![forbid(unsafe_code)]

use lazy_static::lazy_static;
use log::info;
use poem::{listener::TcpListener, Route};
use poem_openapi::OpenApiService;
use std::sync::Arc;

// Registry Utilities
use crate::utils::config::{init_log, init_runtime_context, RuntimeCtx, SRV_ARGS, SRV_DIRS};
use crate::utils::errors::Errors;
use crate::utils::store::StudentStore;
use crate::v1::registry::items_read::ReadItemsApi;
use crate::v1::registry::students_delete::DeleteStudentApi;
use crate::v1::registry::students_get::GetStudentApi;
use crate::v1::registry::version::VersionApi;

// Modules
mod utils;
mod v1;

// ***************************************************************************
//                                Constants
// ***************************************************************************
const SERVER_NAME : &str = "RegistryServer"; // for poem logging

// ***************************************************************************
//                             Static Variables
// ***************************************************************************
// Lazily initialize the parameters variable so that is has a 'static lifetime.
// We exit if we can't read our parameters.
lazy_static! {
    static ref RUNTIME_CTX: RuntimeCtx = init_runtime_context();
}

// ---------------------------------------------------------------------------
// main:
// ---------------------------------------------------------------------------
#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    // --------------- Initialize Server --------------
    // Announce ourselves.
    println!("Starting registry_server!");

    // Initialize the server.
    registry_init();

    // The student registry shared by the get and delete endpoints.  The
    // store is constructed here and injected into the handlers so tests can
    // run against their own instances.
    let store = Arc::new(StudentStore::seeded());

    // --------------- Main Loop Set Up ---------------
    // Assign base URL.
    let registry_url = format!("{}:{}{}",
        RUNTIME_CTX.parms.config.http_addr,
        RUNTIME_CTX.parms.config.http_port,
        "/v1");

    // Create a tuple with all the endpoint API structs.
    let endpoints = (
        GetStudentApi::new(store.clone()),
        DeleteStudentApi::new(store.clone()),
        ReadItemsApi,
        VersionApi,
    );
    let api_service =
        OpenApiService::new(endpoints, RUNTIME_CTX.parms.config.title.clone(), "0.0.1")
            .server(registry_url);

    // Allow the generated openapi specs to be retrieved from the server.
    let spec = api_service.spec_endpoint();
    let spec_yaml = api_service.spec_endpoint_yaml();

    // Create the routes and run the server.
    let addr = format!("{}{}", "0.0.0.0:", RUNTIME_CTX.parms.config.http_port);
    let ui = api_service.swagger_ui();
    let app = Route::new()
        .nest("/v1", api_service)
        .nest("/", ui)
        .at("/spec", spec)
        .at("/spec_yaml", spec_yaml);

    // ------------------ Main Loop -------------------
    poem::Server::new(TcpListener::bind(addr))
        .name(SERVER_NAME)
        .run(app)
        .await
}

// ***************************************************************************
//                             Private Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// registry_init:
// ---------------------------------------------------------------------------
/** Initialize all subsystems and data structures other than those needed
 * to configure the main loop processor.
 */
fn registry_init() {
    // The data directories are created as a side effect of the first access.
    // When only directory creation was requested we are done.
    if SRV_ARGS.create_dirs_only {
        println!("Data directories created under {}.", SRV_DIRS.root_dir);
        std::process::exit(0);
    }

    // Configure our log.
    init_log();

    // Force the reading of input parameters and initialization of the
    // runtime context.
    info!("{}", Errors::InputParms(format!("{:#?}", *RUNTIME_CTX)));

    // Log build info.
    print_version_info();
}

// ---------------------------------------------------------------------------
// print_version_info:
// ---------------------------------------------------------------------------
fn print_version_info() {
    // Log build info.
    info!("{}.", format!("\n*** Running registry_server={}, BRANCH={}, COMMIT={}, DIRTY={}, SRC_TS={}, RUSTC={}",
                        option_env!("CARGO_PKG_VERSION").unwrap_or("unknown"),
                        env!("GIT_BRANCH"),
                        env!("GIT_COMMIT_SHORT"),
                        env!("GIT_DIRTY"),
                        env!("SOURCE_TIMESTAMP"),
                        env!("RUSTC_VERSION")),
    );
}
