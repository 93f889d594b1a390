use super::{AppState, Scene};

#[derive(Debug, Clone, Copy)]
enum MenuItem {
    PlayOffline,
    AutoDraw,
    Quit,
}

const MENU_ITEMS: [MenuItem; 3] = [MenuItem::PlayOffline, MenuItem::AutoDraw, MenuItem::Quit];

impl MenuItem {
    fn display(self, app: &AppState) -> String {
        match self {
            MenuItem::PlayOffline => {
                if app.game.phase() == crate::game::Phase::Active {
                    "Resume game".to_string()
                } else {
                    "Play offline".to_string()
                }
            }
            MenuItem::AutoDraw => {
                format!("Auto draw: {}", if app.auto_enabled() { "On" } else { "Off" })
            }
            MenuItem::Quit => "Quit".to_string(),
        }
    }

    fn apply(self, app: &mut AppState) {
        match self {
            MenuItem::PlayOffline => {
                if app.game.phase() == crate::game::Phase::Active {
                    app.scene = Scene::Table;
                } else {
                    app.start_game();
                }
            }
            MenuItem::AutoDraw => app.toggle_auto(),
            MenuItem::Quit => app.request_quit(),
        }
    }
}

impl AppState {
    pub fn menu_items_display(&self) -> Vec<String> {
        MENU_ITEMS.iter().map(|item| item.display(self)).collect()
    }

    pub fn toggle_menu(&mut self) {
        self.close_help();
        self.close_history();
        self.scene = match self.scene {
            Scene::Start if self.game.phase() != crate::game::Phase::Idle => Scene::Table,
            Scene::Start => Scene::Start,
            _ => {
                self.menu_index = 0;
                Scene::Start
            }
        };
    }

    pub fn apply_menu(&mut self) {
        let item = MENU_ITEMS[self.menu_index % MENU_ITEMS.len()];
        item.apply(self);
    }

    pub fn menu_next(&mut self) {
        self.menu_index = (self.menu_index + 1) % MENU_ITEMS.len();
    }
    pub fn menu_prev(&mut self) {
        self.menu_index = (self.menu_index + MENU_ITEMS.len() - 1) % MENU_ITEMS.len();
    }
}
