//! arpwarden binary: monitor ARP traffic on one interface and answer
//! who-has requests for the local address

mod args;

use args::Cli;
use arpwarden_capture::{filters, CaptureConfig, FrameSource};
use arpwarden_core::{Interface, Result};
use arpwarden_engine::{ArpEngine, InterfaceSender, LogSink, ScopeFilter};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse_args();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run(cli: Cli) -> Result<()> {
    if cli.list_interfaces {
        for iface in Interface::list_all() {
            let status = if iface.is_capture_capable() { "up" } else { "unusable" };
            let mac = iface
                .mac_address
                .map(|m| m.to_string())
                .unwrap_or_else(|| "no MAC".to_string());
            println!("{:<12} {:<20} [{}]", iface.name, mac, status);
        }
        return Ok(());
    }

    let name = match cli.interface {
        Some(name) => name,
        None => Interface::find_default()?.name,
    };

    // Fail closed: without a local IP and MAC the dispatch rules are
    // undefined, so a misconfigured interface is fatal at startup.
    let interface = Interface::by_name(&name)?;
    let binding = interface.binding()?;
    info!(interface = %name, local = %binding, "starting ARP engine");

    let scope = if cli.test_scope {
        ScopeFilter::test_scope()
    } else {
        match cli.scope_mac {
            Some(mac) => ScopeFilter::Mac(mac),
            None => ScopeFilter::All,
        }
    };
    if let ScopeFilter::Mac(mac) = scope {
        warn!(%mac, "capture scoped to a single MAC; this is a test aid");
    }

    let mut source = FrameSource::open(&name, &CaptureConfig::default())?;
    source.set_filter(&filters::arp_filter())?;

    let handle = source.handle();
    ctrlc::set_handler(move || {
        info!("interrupt received, closing capture");
        handle.close();
    })
    .map_err(|e| {
        arpwarden_core::Error::Interface(format!("Failed to install signal handler: {}", e))
    })?;

    let sender = InterfaceSender::new(&interface)?;
    let mut engine = ArpEngine::new(binding, sender, LogSink).with_filter(scope);

    engine.run(&mut source)?;

    info!("{}", source.stats().format());
    info!(hosts = engine.table().len(), "final host table");
    let mut entries: Vec<_> = engine.table().snapshot().into_iter().collect();
    entries.sort();
    for (ip, mac) in entries {
        println!("{:<16} {}", ip, mac);
    }

    Ok(())
}
