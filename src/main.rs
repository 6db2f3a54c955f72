mod command;

use std::rc::Rc;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::{JoinHandle, LocalSet};

use rainfall_core::Config;
use rainfall_ui::{
    ControllerError, FormController, FormView, Mode, ParameterField, ParameterForm, ResultView,
    NO_RAIN_CLASS,
};
use rainfall_weather::{BackendClient, ConfiguredGeolocator};

use command::{Command, HELP};

type Controller = FormController<BackendClient, ConfiguredGeolocator>;

/// Console stand-in for the browser page.
///
/// Runs on a single thread; each trigger runs as its own local task so a
/// second action can start while the first is still waiting on the backend.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    rainfall_core::init();

    let config = match Config::load_validated() {
        Ok((config, _)) => config,
        Err(e) => {
            tracing::warn!("{} ({})", e.user_message(), e);
            Config::default()
        }
    };

    let backend = BackendClient::new(&config.backend.base_url)?;
    tracing::info!("Rainfall form started against {}", backend.base_url());
    let geolocator = ConfiguredGeolocator::from_position(
        config.location.map(|l| (l.latitude, l.longitude)),
    );
    let mode = config.ui.default_mode.parse::<Mode>().unwrap_or_default();

    let mut controller = FormController::new(backend, geolocator, mode);
    let renders = controller.subscribe();

    LocalSet::new()
        .run_until(run(Rc::new(controller), renders))
        .await
}

async fn run(controller: Rc<Controller>, mut renders: UnboundedReceiver<ResultView>) -> Result<()> {
    println!("{}", HELP);
    print_view(&controller.view());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut pending: Vec<JoinHandle<()>> = Vec::new();
    let mut quit = false;

    loop {
        tokio::select! {
            Some(view) = renders.recv() => print_render(&view),
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if line.trim().is_empty() {
                    continue;
                }
                match Command::parse(&line) {
                    Ok(Command::Quit) => {
                        quit = true;
                        break;
                    }
                    Ok(command) => {
                        if let Some(handle) = execute(&controller, command) {
                            pending.push(handle);
                        }
                    }
                    Err(e) => println!("? {}", e),
                }
                pending.retain(|h| !h.is_finished());
            }
        }
    }

    // End of input: let in-flight requests land before exiting.
    if !quit {
        for handle in pending {
            let _ = handle.await;
        }
    }
    while let Ok(view) = renders.try_recv() {
        print_render(&view);
    }

    Ok(())
}

fn execute(controller: &Rc<Controller>, command: Command) -> Option<JoinHandle<()>> {
    match command {
        Command::SetCity(text) => controller.set_city(text),
        Command::SetShared(field, value) => controller.set_shared_field(field, value),
        Command::SetManual(field, value) => controller.set_manual_field(field, value),
        Command::Show => print_view(&controller.view()),
        Command::Help => println!("{}", HELP),
        Command::Quit => {}
        Command::Run(trigger) => {
            let controller = Rc::clone(controller);
            return Some(tokio::task::spawn_local(async move {
                if let Err(e) = controller.dispatch(trigger).await {
                    report(&e);
                }
            }));
        }
    }
    None
}

fn report(error: &ControllerError) {
    if error.is_alert() {
        println!("ALERT: {}", error);
    } else {
        println!("({})", error);
    }
}

fn print_render(view: &ResultView) {
    if view.is_empty() {
        println!("[result] (cleared)");
        return;
    }

    let mut line = format!("[result] {}", view.text());
    if let Some(color) = view.color() {
        line.push_str(&format!("  color={}", color));
    }
    if view.has_no_rain_marker() {
        line.push_str(&format!("  .{}", NO_RAIN_CLASS));
    }
    println!("{}", line);
}

fn print_form(title: &str, form: &ParameterForm) {
    println!("  {}:", title);
    for field in ParameterField::ALL {
        println!("    {:<14}{}", field.name(), form.get(field));
    }
}

fn print_view(view: &FormView) {
    println!("mode: {}", view.mode);
    if view.sections.city {
        println!("  city: {:?}", view.city);
    }
    if view.sections.current_location {
        println!("  current location: use 'locate'");
    }
    if view.sections.manual {
        print_form("manual parameters", &view.manual);
    }
    if view.sections.weather {
        print_form("fetched parameters ('predict' available)", &view.shared);
    }
    print_render(&view.result);
}
