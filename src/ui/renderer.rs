//! Terminal setup and the event loop.

use std::io;
use std::sync::Arc;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use crate::config::Config;
use crate::platform::PlatformClient;
use crate::ui::app::SearchPanel;
use crate::ui::core::{actions::Action, EventHandler, EventType};

/// Run the search panel until the user quits.
pub async fn run_app(config: Config, client: Arc<dyn PlatformClient>) -> anyhow::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if config.ui.mouse_enabled {
        execute!(io::stdout(), EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut panel = SearchPanel::new(config, client);
    let mut event_handler = EventHandler::new();

    let result = run_app_loop(&mut terminal, &mut panel, &mut event_handler).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result
}

async fn run_app_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    panel: &mut SearchPanel,
    event_handler: &mut EventHandler,
) -> anyhow::Result<()> {
    // Initial form data before the first frame
    let bootstrap = panel.bootstrap().await;
    panel.handle_app_action(bootstrap).await;

    let mut needs_render = true;

    loop {
        if needs_render {
            terminal.draw(|f| panel.render(f, f.area()))?;
            needs_render = false;
        }

        match event_handler.next_event().await? {
            event @ (EventType::Key(_) | EventType::Mouse(_)) => {
                let action = panel.handle_event(event);
                if matches!(panel.handle_app_action(action).await, Action::Quit) {
                    return Ok(());
                }
                needs_render = true;
            }
            EventType::Resize(_, _) | EventType::Render => {
                needs_render = true;
            }
            EventType::Tick => {
                // Deferred focus checks also drain on ticks, covering
                // focus changes that did not come from input events
                let action = panel.handle_event(EventType::Tick);
                if !matches!(action, Action::None) {
                    panel.handle_app_action(action).await;
                    needs_render = true;
                }
            }
            EventType::Other => {}
        }

        if panel.should_quit() {
            break;
        }
    }

    Ok(())
}
