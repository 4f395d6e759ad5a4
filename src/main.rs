use celebrity_search::lookup::Lookup;
use celebrity_search::web::app::App;
use celebrity_search::web::state::AppState;
use celebrity_search::web::templates;
use celebrity_search::AppConfig;
use std::env::args;
use std::path::PathBuf;
use std::process::exit;
use tracing::Level;

fn main() {
    let args: Vec<String> = args().collect();
    if args.len() < 2 {
        println!(
            "usage: {} CFG",
            args.first().map(String::as_str).unwrap_or("celebrity-search")
        );
        exit(1);
    }

    let cfg: AppConfig = AppConfig::new_from_file_and_env(args[1].as_ref()).unwrap_or_else(|e| {
        eprintln!("error: {}", e);
        exit(1);
    });

    // A missing DSN leaves the client disabled.
    let _guard = sentry::init((
        cfg.sentry_dsn.clone(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: Some(cfg.env.clone().into()),
            ..Default::default()
        },
    ));

    // initialize tracing
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    tracing::debug!(
        "serving on {} with uploads in {}",
        cfg.bind_addr,
        cfg.upload_dir.display()
    );

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .unwrap_or_else(|e| {
            eprintln!("error starting runtime: {}", e);
            exit(1);
        })
        .block_on(async {
            let template_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("templates");
            let env = templates::environment(template_path);

            let lookup = Lookup::new(&cfg).unwrap_or_else(|e| {
                eprintln!("error building http client: {}", e);
                exit(1);
            });

            let state = AppState {
                config: cfg.clone(),
                env,
                lookup,
            };

            if let Err(e) = App::new(state).serve().await {
                tracing::error!("server error: {:?}", e);
                exit(1);
            }
        });
}
