use std::sync::Arc;
use std::time::Instant;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::{Frame, Terminal};

use crate::config::Config;
use crate::form::{Backend, Completion, SubmissionChannel};
use crate::model::{Appearance, SessionProvider, SharedData};
use crate::routes::{RouteError, RouteTable};
use crate::storage::{AccountManager, Preferences};

use super::action::{Action, ScreenState};
use super::error::AppError;
use super::screens::{
    AppearanceState, DashboardState, HelpState, PasswordState, ProfileState, WelcomeState,
    appearance, dashboard, draw_appearance, draw_dashboard, draw_help, draw_password,
    draw_profile, draw_welcome, help, password, profile, welcome,
};
use super::theme::Palette;
use super::widgets::draw_shell;

/// All screens the app can navigate between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    /// Landing page.
    Welcome,
    /// Signed-in home.
    Dashboard,
    /// Name and email settings.
    Profile,
    /// Password change.
    Password,
    /// Color scheme.
    Appearance,
    /// Key reference.
    Help,
}

impl Screen {
    /// Human-readable page title.
    pub fn label(self) -> &'static str {
        match self {
            Self::Welcome => "Welcome",
            Self::Dashboard => "Dashboard",
            Self::Profile => "Profile",
            Self::Password => "Password",
            Self::Appearance => "Appearance",
            Self::Help => "Help",
        }
    }

    /// Named route the page is served at.
    pub fn route(self) -> Option<&'static str> {
        match self {
            Self::Welcome => Some("home"),
            Self::Dashboard => Some("dashboard"),
            Self::Profile => Some("profile.edit"),
            Self::Password => Some("password.edit"),
            Self::Appearance => Some("appearance"),
            Self::Help => None,
        }
    }

    /// Pages only a signed-in user may open.
    pub fn requires_auth(self) -> bool {
        !matches!(self, Self::Welcome | Self::Help)
    }
}

/// Top-level application state.
pub struct App {
    screen: Screen,
    config: Config,
    routes: RouteTable,
    session: Arc<dyn SessionProvider>,
    channel: SubmissionChannel,
    manager: AccountManager,
    shared: SharedData,
    appearance: Appearance,
    palette: Palette,
    welcome: WelcomeState,
    dashboard: DashboardState,
    profile: ProfileState,
    password: PasswordState,
    appearance_page: AppearanceState,
    help: HelpState,
    should_quit: bool,
}

impl App {
    /// Creates an `App` on the [`Screen::Welcome`] page.
    ///
    /// Every page is mounted once up front so a missing route fails here
    /// rather than on navigation.
    pub fn new(
        config: Config,
        manager: AccountManager,
        backend: Arc<dyn Backend>,
        session: Arc<dyn SessionProvider>,
    ) -> Result<Self, AppError> {
        let routes = config.route_table();
        let shared = session.shared_data();
        let appearance = manager.load_preferences()?.appearance;
        let channel = SubmissionChannel::new(backend)?;

        Ok(Self {
            screen: Screen::Welcome,
            welcome: WelcomeState::new(&shared, &routes)?,
            dashboard: DashboardState::new(&shared),
            profile: ProfileState::new(&shared, &routes)?,
            password: PasswordState::new(&routes)?,
            appearance_page: AppearanceState::new(appearance),
            help: HelpState::new(),
            palette: Palette::for_appearance(appearance),
            appearance,
            config,
            routes,
            session,
            channel,
            manager,
            shared,
            should_quit: false,
        })
    }

    /// Main event loop: draw, poll for a key, apply resolved submissions.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    pub fn run<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        tracing::info!(screen = ?self.screen, "event loop started");
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            if event::poll(self.config.tick())? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key);
                }
            }
            self.pump();
        }
        tracing::info!("event loop stopped");
        Ok(())
    }

    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    fn draw(&self, frame: &mut Frame) {
        let p = &self.palette;
        frame.render_widget(
            Block::default().style(Style::default().bg(p.background).fg(p.text)),
            frame.area(),
        );

        let (crumbs, hints) = match self.screen {
            Screen::Welcome => (welcome::BREADCRUMBS, welcome::HINTS),
            Screen::Dashboard => (dashboard::BREADCRUMBS, dashboard::HINTS),
            Screen::Profile => (profile::BREADCRUMBS, profile::HINTS),
            Screen::Password => (password::BREADCRUMBS, password::HINTS),
            Screen::Appearance => (appearance::BREADCRUMBS, appearance::HINTS),
            Screen::Help => (help::BREADCRUMBS, help::HINTS),
        };
        let area = draw_shell(crumbs, self.location(), hints, p, frame, frame.area());

        match self.screen {
            Screen::Welcome => draw_welcome(&self.welcome, p, frame, area),
            Screen::Dashboard => draw_dashboard(&self.dashboard, p, frame, area),
            Screen::Profile => draw_profile(&self.profile, p, frame, area),
            Screen::Password => draw_password(&self.password, p, frame, area),
            Screen::Appearance => draw_appearance(&self.appearance_page, p, frame, area),
            Screen::Help => draw_help(&self.help, p, frame, area),
        }
    }

    /// Path of the current page, or `""` for pages without a route.
    pub fn location(&self) -> &str {
        self.screen
            .route()
            .and_then(|name| self.routes.resolve(name).ok())
            .unwrap_or("")
    }

    /// Handles a key event: global keys first, then the current screen.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if key.code == KeyCode::F(1) {
            if self.screen != Screen::Help {
                self.help.open_for(self.screen);
                self.screen = Screen::Help;
            }
            return;
        }

        if key.modifiers.contains(KeyModifiers::ALT) {
            let target = match key.code {
                KeyCode::Char('d') => Some(Screen::Dashboard),
                KeyCode::Char('p') => Some(Screen::Profile),
                KeyCode::Char('w') => Some(Screen::Password),
                KeyCode::Char('a') => Some(Screen::Appearance),
                _ => None,
            };
            if let Some(target) = target {
                self.navigate(target);
                return;
            }
        }

        let action = match self.screen {
            Screen::Welcome => self.welcome.handle_key(key),
            Screen::Dashboard => self.dashboard.handle_key(key),
            Screen::Profile => self.profile.handle_key(key),
            Screen::Password => self.password.handle_key(key),
            Screen::Appearance => self.appearance_page.handle_key(key),
            Screen::Help => self.help.handle_key(key),
        };
        self.apply(action);
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Navigate(screen) => self.navigate(screen),
            Action::Submit(ticket, request) => self.channel.send(ticket, request),
            Action::SetAppearance(appearance) => self.set_appearance(appearance),
            Action::Quit => self.should_quit = true,
        }
    }

    /// Switches pages. Pages are remounted from the latest shared data,
    /// except when returning from help to the page that opened it.
    fn navigate(&mut self, target: Screen) {
        let target = if target.requires_auth() && self.shared.user().is_none() {
            tracing::warn!(?target, "no signed-in user; staying on welcome");
            Screen::Welcome
        } else {
            target
        };
        if target == self.screen {
            return;
        }
        let returning = self.screen == Screen::Help && target == self.help.origin();
        if !returning {
            if let Err(e) = self.mount(target) {
                tracing::error!(error = %e, ?target, "cannot open page");
                return;
            }
        }
        tracing::debug!(from = ?self.screen, to = ?target, "navigate");
        self.screen = target;
    }

    fn mount(&mut self, target: Screen) -> Result<(), RouteError> {
        match target {
            Screen::Welcome => self.welcome = WelcomeState::new(&self.shared, &self.routes)?,
            Screen::Dashboard => self.dashboard = DashboardState::new(&self.shared),
            Screen::Profile => self.profile = ProfileState::new(&self.shared, &self.routes)?,
            Screen::Password => self.password = PasswordState::new(&self.routes)?,
            Screen::Appearance => self.appearance_page = AppearanceState::new(self.appearance),
            Screen::Help => {}
        }
        Ok(())
    }

    fn set_appearance(&mut self, appearance: Appearance) {
        self.appearance = appearance;
        self.palette = Palette::for_appearance(appearance);
        if let Err(e) = self.manager.save_preferences(&Preferences { appearance }) {
            tracing::warn!(error = %e, "could not save appearance preference");
        }
    }

    /// Applies every resolved submission, then ends expired acknowledgments.
    pub fn pump(&mut self) {
        let mut resolved = false;
        while let Some(completion) = self.channel.try_next() {
            self.resolve(completion);
            resolved = true;
        }
        if resolved {
            self.refresh_shared();
        }
        let now = Instant::now();
        let ttl = self.config.success_ack();
        self.profile.expire(now, ttl);
        self.password.expire(now, ttl);
    }

    fn resolve(&mut self, completion: Completion) {
        let ticket = completion.ticket;
        let accepted = completion.outcome.is_accepted();
        let applied = if self.profile.owns(ticket) {
            self.profile.apply(completion)
        } else if self.password.owns(ticket) {
            self.password.apply(completion)
        } else {
            tracing::debug!(ticket = ticket.id(), "completion for a page no longer mounted");
            return;
        };
        tracing::info!(ticket = ticket.id(), accepted, ?applied, "submission resolved");
    }

    /// Re-reads shared data after the backend may have changed it.
    fn refresh_shared(&mut self) {
        self.shared = self.session.shared_data();
        self.dashboard.set_shared(&self.shared);
        self.profile.set_shared(&self.shared);
    }

    // --- Accessors ---

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn shared(&self) -> &SharedData {
        &self.shared
    }

    pub fn appearance(&self) -> Appearance {
        self.appearance
    }

    pub fn profile(&self) -> &ProfileState {
        &self.profile
    }

    pub fn password(&self) -> &PasswordState {
        &self.password
    }

    /// Blocks until one outstanding submission resolves, then applies it.
    #[cfg(test)]
    fn settle_one(&mut self) {
        if let Some(completion) = self.channel.wait_next() {
            self.resolve(completion);
            self.refresh_shared();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use ratatui::backend::TestBackend;

    use super::*;
    use crate::form::SubmissionStatus;
    use crate::storage::{LocalBackend, SEED_EMAIL, SEED_NAME, SEED_PASSWORD};
    use crate::tui::testing::{alt, buffer_to_string, ctrl, press, release, type_str};

    fn make_app() -> (tempfile::TempDir, App) {
        let dir = tempfile::tempdir().unwrap();
        let manager = AccountManager::with_path(dir.path()).unwrap();
        manager.load_or_seed().unwrap();
        let config = Config::default();
        let backend = Arc::new(LocalBackend::new(manager.clone(), &config.route_table()).unwrap());
        let app = App::new(config, manager, backend.clone(), backend).unwrap();
        (dir, app)
    }

    fn guest_app() -> (tempfile::TempDir, App) {
        let dir = tempfile::tempdir().unwrap();
        let manager = AccountManager::with_path(dir.path()).unwrap();
        let config = Config::default();
        let backend = Arc::new(LocalBackend::new(manager.clone(), &config.route_table()).unwrap());
        let app = App::new(config, manager, backend.clone(), backend).unwrap();
        (dir, app)
    }

    fn type_into(app: &mut App, text: &str) {
        type_str(&mut |k| app.handle_key(k), text);
    }

    fn clear_field(app: &mut App, len: usize) {
        for _ in 0..len {
            app.handle_key(press(KeyCode::Backspace));
        }
    }

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(110, 45)).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();
        buffer_to_string(terminal.backend().buffer())
    }

    mod navigation {
        use super::*;

        #[test]
        fn starts_on_welcome() {
            let (_dir, app) = make_app();
            assert_eq!(app.screen(), Screen::Welcome);
            assert_eq!(app.location(), "/");
            assert!(!app.should_quit());
        }

        #[test]
        fn enter_on_welcome_opens_dashboard() {
            let (_dir, mut app) = make_app();
            app.handle_key(press(KeyCode::Enter));
            assert_eq!(app.screen(), Screen::Dashboard);
            assert_eq!(app.location(), "/dashboard");
        }

        #[test]
        fn alt_keys_jump_between_pages() {
            let (_dir, mut app) = make_app();
            app.handle_key(alt('p'));
            assert_eq!(app.screen(), Screen::Profile);
            assert_eq!(app.location(), "/settings/profile");
            app.handle_key(alt('w'));
            assert_eq!(app.screen(), Screen::Password);
            app.handle_key(alt('a'));
            assert_eq!(app.screen(), Screen::Appearance);
            app.handle_key(alt('d'));
            assert_eq!(app.screen(), Screen::Dashboard);
        }

        #[test]
        fn guest_cannot_leave_welcome() {
            let (_dir, mut app) = guest_app();
            assert!(app.shared().user().is_none());
            app.handle_key(alt('p'));
            assert_eq!(app.screen(), Screen::Welcome);
        }

        #[test]
        fn f1_opens_help_and_esc_returns_without_remount() {
            let (_dir, mut app) = make_app();
            app.handle_key(alt('p'));
            type_into(&mut app, "!");
            app.handle_key(press(KeyCode::F(1)));
            assert_eq!(app.screen(), Screen::Help);
            assert_eq!(app.location(), "");

            app.handle_key(press(KeyCode::Esc));
            assert_eq!(app.screen(), Screen::Profile);
            assert_eq!(app.profile().form().value("name"), format!("{SEED_NAME}!"));
        }

        #[test]
        fn help_to_another_page_mounts_it() {
            let (_dir, mut app) = make_app();
            app.handle_key(alt('p'));
            type_into(&mut app, "!");
            app.handle_key(press(KeyCode::F(1)));
            app.handle_key(alt('w'));
            assert_eq!(app.screen(), Screen::Password);
            app.handle_key(alt('p'));
            assert_eq!(app.profile().form().value("name"), SEED_NAME);
        }

        #[test]
        fn leaving_a_form_discards_edits() {
            let (_dir, mut app) = make_app();
            app.handle_key(alt('p'));
            type_into(&mut app, "!");
            app.handle_key(alt('d'));
            app.handle_key(alt('p'));
            assert_eq!(app.profile().form().value("name"), SEED_NAME);
        }

        #[test]
        fn ctrl_c_quits_from_a_form() {
            let (_dir, mut app) = make_app();
            app.handle_key(alt('p'));
            app.handle_key(ctrl('c'));
            assert!(app.should_quit());
        }

        #[test]
        fn q_on_welcome_quits() {
            let (_dir, mut app) = make_app();
            app.handle_key(press(KeyCode::Char('q')));
            assert!(app.should_quit());
        }

        #[test]
        fn release_events_are_ignored() {
            let (_dir, mut app) = make_app();
            app.handle_key(release(KeyCode::Char('q')));
            assert!(!app.should_quit());
        }

        #[test]
        fn screen_labels_and_routes() {
            let expected = [
                (Screen::Welcome, "Welcome", Some("home")),
                (Screen::Dashboard, "Dashboard", Some("dashboard")),
                (Screen::Profile, "Profile", Some("profile.edit")),
                (Screen::Password, "Password", Some("password.edit")),
                (Screen::Appearance, "Appearance", Some("appearance")),
                (Screen::Help, "Help", None),
            ];
            for (screen, label, route) in expected {
                assert_eq!(screen.label(), label);
                assert_eq!(screen.route(), route);
            }
        }
    }

    mod submissions {
        use super::*;

        #[test]
        fn profile_save_updates_shared_data() {
            let (_dir, mut app) = make_app();
            app.handle_key(alt('p'));
            clear_field(&mut app, SEED_NAME.len());
            type_into(&mut app, "Ada");
            app.handle_key(press(KeyCode::Enter));
            assert!(app.profile().form().status().is_in_flight());
            assert!(render(&app).contains("Saving..."));

            app.settle_one();
            assert!(app.profile().form().recently_successful());
            assert_eq!(app.shared().user().unwrap().name, "Ada");
            assert!(render(&app).contains("Saved successfully!"));
        }

        #[test]
        fn profile_rejection_shows_inline_error() {
            let (_dir, mut app) = make_app();
            app.handle_key(alt('p'));
            clear_field(&mut app, SEED_NAME.len());
            app.handle_key(press(KeyCode::Enter));
            app.settle_one();

            assert_eq!(app.profile().form().status(), SubmissionStatus::Failed);
            assert_eq!(app.profile().form().value("name"), "");
            assert!(app.profile().form().error("name").is_some());
            assert_eq!(app.shared().user().unwrap().name, SEED_NAME);
        }

        #[test]
        fn password_change_resets_form() {
            let (_dir, mut app) = make_app();
            app.handle_key(alt('w'));
            type_into(&mut app, SEED_PASSWORD);
            app.handle_key(press(KeyCode::Tab));
            type_into(&mut app, "correct horse");
            app.handle_key(press(KeyCode::Tab));
            type_into(&mut app, "correct horse");
            app.handle_key(press(KeyCode::Enter));
            app.settle_one();

            let form = app.password().form();
            assert!(form.recently_successful());
            assert!(form.values().all_empty());
        }

        #[test]
        fn wrong_current_password_is_cleared() {
            let (_dir, mut app) = make_app();
            app.handle_key(alt('w'));
            type_into(&mut app, "nope");
            app.handle_key(press(KeyCode::Tab));
            type_into(&mut app, "correct horse");
            app.handle_key(press(KeyCode::Tab));
            type_into(&mut app, "correct horse");
            app.handle_key(press(KeyCode::Enter));
            app.settle_one();

            let form = app.password().form();
            assert_eq!(form.value("current_password"), "");
            assert_eq!(form.value("password"), "correct horse");
            assert_eq!(
                form.error("current_password"),
                Some("The provided password does not match your current password.")
            );
        }

        #[test]
        fn completion_after_leaving_page_is_dropped() {
            let (_dir, mut app) = make_app();
            app.handle_key(alt('p'));
            clear_field(&mut app, SEED_NAME.len());
            type_into(&mut app, "Late");
            app.handle_key(press(KeyCode::Enter));
            app.handle_key(alt('d'));
            app.handle_key(alt('p'));
            app.settle_one();

            assert_eq!(app.profile().form().status(), SubmissionStatus::Idle);
            assert_eq!(app.shared().user().unwrap().name, "Late");
        }

        #[test]
        fn acknowledgment_expires_on_pump() {
            let (_dir, mut app) = make_app();
            app.config.success_ack_ms = 0;
            app.handle_key(alt('p'));
            app.handle_key(press(KeyCode::Enter));
            app.settle_one();
            std::thread::sleep(Duration::from_millis(1));
            app.pump();
            assert_eq!(app.profile().form().status(), SubmissionStatus::Idle);
        }

        #[test]
        fn resend_verification_sets_flash() {
            let (_dir, mut app) = make_app();
            app.handle_key(alt('p'));
            assert!(app.profile().needs_verification());

            app.handle_key(alt('r'));
            app.settle_one();
            assert!(app.profile().verification_sent());
            assert!(
                render(&app).contains("A new verification link has been sent to your email address.")
            );
        }

        #[test]
        fn email_change_after_flash_clears_it() {
            let (_dir, mut app) = make_app();
            app.handle_key(alt('p'));
            app.handle_key(alt('r'));
            app.settle_one();

            app.handle_key(press(KeyCode::Tab));
            clear_field(&mut app, SEED_EMAIL.len());
            type_into(&mut app, "new@example.com");
            app.handle_key(press(KeyCode::Enter));
            app.settle_one();

            assert_eq!(app.shared().user().unwrap().email, "new@example.com");
            assert!(!app.profile().verification_sent());
            assert!(app.profile().needs_verification());
        }
    }

    mod appearance_pref {
        use super::*;

        #[test]
        fn selecting_theme_persists_preference() {
            let (dir, mut app) = make_app();
            app.handle_key(alt('a'));
            app.handle_key(press(KeyCode::Char('1')));
            assert_eq!(app.appearance(), Appearance::Light);

            let manager = AccountManager::with_path(dir.path()).unwrap();
            assert_eq!(
                manager.load_preferences().unwrap().appearance,
                Appearance::Light
            );
        }

        #[test]
        fn saved_preference_is_loaded_on_start() {
            let (dir, mut app) = make_app();
            app.handle_key(alt('a'));
            app.handle_key(press(KeyCode::Char('2')));
            drop(app);

            let manager = AccountManager::with_path(dir.path()).unwrap();
            let config = Config::default();
            let backend =
                Arc::new(LocalBackend::new(manager.clone(), &config.route_table()).unwrap());
            let app = App::new(config, manager, backend.clone(), backend).unwrap();
            assert_eq!(app.appearance(), Appearance::Dark);
        }
    }

    mod startup {
        use std::collections::BTreeMap;

        use super::*;

        #[test]
        fn route_overrides_reach_pages() {
            let dir = tempfile::tempdir().unwrap();
            let manager = AccountManager::with_path(dir.path()).unwrap();
            let mut routes = BTreeMap::new();
            routes.insert("login".to_string(), "/signin".to_string());
            let config = Config {
                routes,
                ..Config::default()
            };
            let backend =
                Arc::new(LocalBackend::new(manager.clone(), &config.route_table()).unwrap());
            let app = App::new(config, manager, backend.clone(), backend).unwrap();

            assert_eq!(app.screen(), Screen::Welcome);
            assert!(render(&app).contains("Log in at /signin"));
        }
    }
}
