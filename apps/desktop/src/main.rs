use std::{path::PathBuf, sync::Arc, time::Instant};

use iced::widget::{button, column, container, row, scrollable, text, text_input};
use iced::{Color, Element, Length, Task};
use resumo_auth::{AuthError, AuthStore, Route, UserIdentity, require_user};
use resumo_core::{
    AnalysisDocument, AnalysisProvider, AnalysisSession, Config, ExportFormat, Exporter,
    MemoryClipboard, ProviderError, SampleProvider, SectionKey, load_config,
    logging::{LogConfig, init_logging},
    view::COPY_ACK_DURATION,
};
use tokio::sync::watch;

mod report;

const ERROR: Color = Color::from_rgb(0.80, 0.15, 0.15);

fn main() -> iced::Result {
    init_logging(&LogConfig::from_verbosity(1));
    tracing::info!("starting resumo desktop");

    iced::application(App::new, App::update, App::view)
        .title("Resumo")
        .run()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum AuthMode {
    #[default]
    SignIn,
    SignUp,
}

#[derive(Debug, Default)]
struct LoginForm {
    email: String,
    password: String,
    mode: AuthMode,
    busy: bool,
    error: Option<String>,
}

#[derive(Debug, Clone)]
pub enum Message {
    EmailChanged(String),
    PasswordChanged(String),
    SwitchAuthMode,
    SubmitAuth,
    AuthFinished(Result<UserIdentity, AuthError>),
    SignOut,
    SignedOut,
    UrlChanged(String),
    Analyze,
    Analyzed(u64, Result<AnalysisDocument, ProviderError>),
    ToggleSection(SectionKey),
    Copy,
    CopyExpired,
    Export(ExportFormat),
    Exported(Result<Option<PathBuf>, String>),
}

struct App {
    auth: Arc<AuthStore>,
    auth_rx: watch::Receiver<Option<UserIdentity>>,
    user: Option<UserIdentity>,
    route: Route,
    login: LoginForm,
    session: AnalysisSession,
    provider: Arc<SampleProvider>,
    exporter: Exporter,
    status: Option<String>,
}

impl App {
    fn new() -> (Self, Task<Message>) {
        let config = load_config(None).unwrap_or_else(|e| {
            tracing::warn!("using default configuration: {e}");
            Config::default()
        });
        (Self::with_config(&config), Task::none())
    }

    fn with_config(config: &Config) -> Self {
        let auth = Arc::new(AuthStore::new());
        let auth_rx = auth.subscribe();
        let route = require_user(&auth, Route::Analysis);
        Self {
            auth,
            auth_rx,
            user: None,
            route,
            login: LoginForm::default(),
            session: AnalysisSession::new(),
            provider: Arc::new(SampleProvider::new(config.provider.latency())),
            exporter: Exporter::from_config(config),
            status: None,
        }
    }

    /// Pick up the latest auth state and re-run the route guard.
    fn sync_auth(&mut self) {
        self.user = self.auth_rx.borrow_and_update().clone();
        self.route = require_user(&self.auth, Route::Analysis);
        if self.user.is_none() {
            self.session.reset();
            self.status = None;
        }
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::EmailChanged(email) => self.login.email = email,
            Message::PasswordChanged(password) => self.login.password = password,
            Message::SwitchAuthMode => {
                self.login.mode = match self.login.mode {
                    AuthMode::SignIn => AuthMode::SignUp,
                    AuthMode::SignUp => AuthMode::SignIn,
                };
                self.login.error = None;
            }
            Message::SubmitAuth => {
                if self.login.busy {
                    return Task::none();
                }
                self.login.busy = true;
                self.login.error = None;
                let auth = Arc::clone(&self.auth);
                let email = self.login.email.clone();
                let password = self.login.password.clone();
                let mode = self.login.mode;
                return Task::perform(
                    async move {
                        match mode {
                            AuthMode::SignIn => auth.sign_in(&email, &password).await,
                            AuthMode::SignUp => auth.sign_up(&email, &password).await,
                        }
                    },
                    Message::AuthFinished,
                );
            }
            Message::AuthFinished(result) => {
                self.login.busy = false;
                match result {
                    Ok(_) => {
                        self.login.password.clear();
                        self.sync_auth();
                    }
                    Err(e) => self.login.error = Some(e.to_string()),
                }
            }
            Message::SignOut => {
                let auth = Arc::clone(&self.auth);
                return Task::perform(async move { auth.sign_out().await }, |_| {
                    Message::SignedOut
                });
            }
            Message::SignedOut => self.sync_auth(),
            Message::UrlChanged(url) => self.session.set_url(url),
            Message::Analyze => match self.session.begin() {
                Ok(request) => {
                    self.status = None;
                    let provider = Arc::clone(&self.provider);
                    let id = request.id;
                    return Task::perform(
                        async move { provider.analyze(&request.url).await },
                        move |result| Message::Analyzed(id, result),
                    );
                }
                Err(e) => self.status = Some(e.to_string()),
            },
            Message::Analyzed(id, result) => {
                if let Err(e) = self.session.finish(id, result) {
                    self.status = Some(format!("Falha na análise: {e}"));
                }
            }
            Message::ToggleSection(key) => {
                if let Some(view) = self.session.view_mut() {
                    view.toggles_mut().toggle(key);
                }
            }
            Message::Copy => {
                let Some(view) = self.session.view_mut() else {
                    return Task::none();
                };
                let mut clipboard = MemoryClipboard::default();
                if !view.copy_report(&mut clipboard, Instant::now()) {
                    return Task::none();
                }
                let Some(contents) = clipboard.take() else {
                    return Task::none();
                };
                return Task::batch([
                    iced::clipboard::write(contents),
                    Task::perform(
                        async { tokio::time::sleep(COPY_ACK_DURATION).await },
                        |_| Message::CopyExpired,
                    ),
                ]);
            }
            // Only forces a redraw; the acknowledgement expires on its own.
            Message::CopyExpired => {}
            Message::Export(format) => {
                let Some(view) = self.session.view().cloned() else {
                    return Task::none();
                };
                let exporter = self.exporter.clone();
                return Task::perform(
                    async move {
                        exporter
                            .export_format(format, view.document(), Some(&view))
                            .await
                            .map_err(|e| e.to_string())
                    },
                    Message::Exported,
                );
            }
            Message::Exported(result) => {
                self.status = match result {
                    Ok(Some(path)) => Some(format!("Salvo em {}", path.display())),
                    Ok(None) => None,
                    Err(e) => Some(format!("Falha ao exportar: {e}")),
                };
            }
        }
        Task::none()
    }

    fn login_view(&self) -> Element<'_, Message> {
        let (title, submit, switch) = match self.login.mode {
            AuthMode::SignIn => ("Entrar", "Entrar", "Não tem uma conta? Cadastre-se"),
            AuthMode::SignUp => ("Criar conta", "Cadastrar", "Já tem uma conta? Entrar"),
        };

        let mut form = column![
            text(title).size(24),
            text_input("E-mail", &self.login.email)
                .on_input(Message::EmailChanged)
                .padding(10),
            text_input("Senha", &self.login.password)
                .on_input(Message::PasswordChanged)
                .on_submit(Message::SubmitAuth)
                .secure(true)
                .padding(10),
            button(text(submit)).on_press_maybe((!self.login.busy).then_some(Message::SubmitAuth)),
            button(text(switch).size(13))
                .style(button::text)
                .on_press(Message::SwitchAuthMode),
        ]
        .spacing(10)
        .max_width(360);

        if let Some(error) = &self.login.error {
            form = form.push(text(error.as_str()).size(13).color(ERROR));
        }

        container(form)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into()
    }

    fn analysis_view(&self) -> Element<'_, Message> {
        let account = self
            .user
            .as_ref()
            .map(|u| u.display_name.clone().unwrap_or_else(|| u.email.clone()))
            .unwrap_or_default();

        let analyze_label = if self.session.is_processing() {
            "Processando..."
        } else {
            "Analisar"
        };

        let mut content = column![
            row![
                text("Resumo").size(28),
                iced::widget::Space::new().width(Length::Fill),
                text(account).size(13),
                button(text("Sair").size(13)).on_press(Message::SignOut),
            ]
            .spacing(12)
            .align_y(iced::Alignment::Center),
            row![
                text_input("Cole a URL do vídeo do YouTube", self.session.url())
                    .on_input(Message::UrlChanged)
                    .on_submit(Message::Analyze)
                    .padding(10),
                button(text(analyze_label))
                    .on_press_maybe(self.session.can_submit().then_some(Message::Analyze)),
            ]
            .spacing(10),
        ]
        .spacing(16)
        .padding(20);

        if let Some(status) = &self.status {
            content = content.push(text(status.as_str()).size(13));
        }

        if let Some(view) = self.session.view() {
            let copy_label = if view.is_copied(Instant::now()) {
                "Copiado!"
            } else {
                "Copiar Relatório"
            };
            let mut actions = row![button(text(copy_label)).on_press(Message::Copy)].spacing(8);
            for format in ExportFormat::ALL {
                actions = actions.push(
                    button(text(format.extension().to_uppercase()))
                        .on_press(Message::Export(format)),
                );
            }
            content = content.push(actions);
            content = content.push(scrollable(report::report_view(view)).height(Length::Fill));
        }

        content.into()
    }

    fn view(&self) -> Element<'_, Message> {
        match self.route {
            Route::Login | Route::Register => self.login_view(),
            Route::Home | Route::Analysis | Route::Profile => self.analysis_view(),
        }
    }
}

#[cfg(test)]
mod tests {
    use resumo_core::{SessionError, sample::sample_document};

    use super::*;

    fn app() -> App {
        App::with_config(&Config::default())
    }

    #[test]
    fn starts_on_login_until_signed_in() {
        assert_eq!(app().route, Route::Login);
    }

    #[test]
    fn blank_url_shows_validation_message() {
        let mut app = app();
        let _ = app.update(Message::UrlChanged("  ".into()));
        let _ = app.update(Message::Analyze);
        assert_eq!(
            app.status.as_deref(),
            Some("Por favor, insira uma URL do YouTube válida.")
        );
        assert!(!app.session.is_processing());
    }

    #[test]
    fn analysis_result_installs_the_report() {
        let mut app = app();
        let _ = app.update(Message::UrlChanged("https://youtu.be/abc".into()));
        let _ = app.update(Message::Analyze);
        assert!(app.session.is_processing());

        let _ = app.update(Message::Analyzed(1, Ok(sample_document("19/10/2026"))));
        assert!(!app.session.is_processing());

        let _ = app.update(Message::ToggleSection(SectionKey::MainPoints));
        let view = app.session.view().unwrap();
        assert!(!view.toggles().is_open(SectionKey::MainPoints));
    }

    #[test]
    fn copy_sets_the_acknowledgement() {
        let mut app = app();
        let _ = app.update(Message::UrlChanged("https://youtu.be/abc".into()));
        let request = app.session.begin().unwrap();
        let _ = app.session.finish(request.id, Ok(sample_document("19/10/2026")));
        let _ = app.update(Message::Copy);
        assert!(app.session.view().unwrap().is_copied(Instant::now()));
    }

    #[test]
    fn failed_analysis_reports_and_unblocks() {
        let mut app = app();
        let _ = app.update(Message::UrlChanged("https://youtu.be/abc".into()));
        let _ = app.update(Message::Analyze);
        let _ = app.update(Message::Analyzed(1, Err(ProviderError::Failed {
            source_id: "https://youtu.be/abc".into(),
            reason: "timeout".into(),
        })));
        assert!(app.status.as_deref().unwrap().starts_with("Falha na análise"));
        assert!(app.session.can_submit());
    }

    #[test]
    fn failed_sign_in_shows_the_message() {
        let mut app = app();
        let _ = app.update(Message::AuthFinished(Err(AuthError::InvalidCredentials)));
        assert_eq!(app.login.error.as_deref(), Some("E-mail ou senha inválidos"));
        assert_eq!(app.route, Route::Login);
    }

    #[test]
    fn sign_out_discards_the_running_analysis() {
        let mut app = app();
        let _ = app.update(Message::UrlChanged("https://youtu.be/abc".into()));
        let _ = app.update(Message::Analyze);
        let _ = app.update(Message::SignedOut);

        // Still busy: a new analysis must wait for the first one to settle
        let _ = app.update(Message::UrlChanged("https://youtu.be/other".into()));
        assert!(!app.session.can_submit());
        assert_eq!(app.session.begin(), Err(SessionError::AlreadyProcessing));

        let _ = app.update(Message::Analyzed(1, Ok(sample_document("19/10/2026"))));
        assert!(app.session.view().is_none());
        assert!(app.status.is_none());
        assert!(app.session.can_submit());
    }
}
