use anyhow::{Context, Result};
use console::{style, Emoji};
use dialoguer::{theme::ColorfulTheme, Input};
use tracing::{error, info, warn};

use crate::{
    catalog::DataSource,
    cli::{
        args::{Commands, ConfigCommands},
        session::{SessionCommand, HELP},
    },
    models::ProductId,
    router::{Route, RouterError, StoreRouter},
    utils::{
        formatting::{format_order_summary, format_price},
        Config,
    },
    views::{TemplateRegistry, UpdateForm, ViewOptions, ENTER_KEY},
};

static CHECKMARK: Emoji<'_, '_> = Emoji("✅ ", "");
static CROSS: Emoji<'_, '_> = Emoji("❌ ", "");
static WARNING: Emoji<'_, '_> = Emoji("⚠️ ", "");
static INFO: Emoji<'_, '_> = Emoji("ℹ️ ", "");
static CART: Emoji<'_, '_> = Emoji("🛒 ", "");

pub struct CliApp {
    config: Config,
    router: StoreRouter,
}

impl CliApp {
    pub fn new(config: Config, options: ViewOptions) -> Result<Self> {
        let repository = DataSource::from_url(&config.data_url)
            .context("Failed to resolve product data source")?
            .into_repository();

        let router = StoreRouter::new(repository, TemplateRegistry::default(), options)
            .context("Failed to set up the store")?;

        Ok(Self { config, router })
    }

    pub async fn run(&mut self, command: Commands) -> Result<()> {
        match command {
            Commands::Browse => self.handle_browse().await,
            Commands::List => self.handle_list().await,
            Commands::Show { id } => self.handle_show(id).await,
            Commands::Summary { id } => self.handle_summary(id).await,
            Commands::Config { command } => self.handle_config_command(command),
        }
    }

    async fn start(&mut self) -> Result<()> {
        self.router.start().await.map_err(|e| {
            error!("Failed to load the product catalog: {}", e);
            e
        })?;
        Ok(())
    }

    async fn handle_list(&mut self) -> Result<()> {
        self.start().await?;
        self.print_screen();
        Ok(())
    }

    async fn handle_show(&mut self, id: String) -> Result<()> {
        self.start().await?;
        self.router.navigate(Route::Item(ProductId::from(id))).await?;
        self.print_screen();
        Ok(())
    }

    async fn handle_summary(&mut self, id: String) -> Result<()> {
        self.start().await?;
        self.router.navigate(Route::Summary(ProductId::from(id))).await?;
        self.print_screen();
        Ok(())
    }

    async fn handle_browse(&mut self) -> Result<()> {
        self.start().await?;
        println!("{} {}", INFO, style("Type 'help' for commands").dim());
        self.print_screen();

        let theme = ColorfulTheme::default();
        loop {
            let prompt = match self.router.current_route() {
                Some(route) => format!("#{}", route),
                None => "#".to_string(),
            };
            let line: String = Input::with_theme(&theme)
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text()?;

            let command = match SessionCommand::parse(&line) {
                Ok(command) => command,
                Err(message) => {
                    println!("{} {}", WARNING, style(message).yellow());
                    continue;
                }
            };

            match command {
                SessionCommand::Quit => break,
                SessionCommand::Help => println!("{}", HELP),
                SessionCommand::Cart => self.print_cart(),
                SessionCommand::Back => {
                    self.router.back().await;
                    self.print_screen();
                }
                SessionCommand::Go(fragment) => match self.router.navigate_to(&fragment).await {
                    Ok(()) => self.print_screen(),
                    Err(e) => self.report(e),
                },
                SessionCommand::Update { quantity, address } => {
                    let form = UpdateForm::new(quantity, address);
                    match self.router.update_current(&form).await {
                        Ok(item) => {
                            println!(
                                "{} {} x {} in cart",
                                CHECKMARK,
                                item.quantity,
                                style(&item.product.title).green()
                            );
                            self.print_screen();
                        }
                        Err(e) => self.report(e),
                    }
                }
                SessionCommand::Enter { quantity, address } => {
                    let form = UpdateForm::new(quantity, address);
                    match self.router.key_press(ENTER_KEY, &form).await {
                        Ok(_) => self.print_screen(),
                        Err(e) => self.report(e),
                    }
                }
            }
        }

        info!("Session ended with {} cart lines", self.router.cart().len());
        Ok(())
    }

    fn handle_config_command(&self, command: ConfigCommands) -> Result<()> {
        match command {
            ConfigCommands::Show => {
                println!("{} {}", INFO, style("Configuration").bold().cyan());
                println!("Data URL: {}", style(&self.config.data_url).green());
                println!("Fade: {} ms", style(self.config.fade_ms).yellow());
                println!("Pulse step: {} ms", style(self.config.pulse_ms).yellow());
                println!("Log level: {}", style(&self.config.log_level).dim());
                println!("Environment: {}", style(&self.config.environment).dim());
            }
        }
        Ok(())
    }

    fn report(&self, e: RouterError) {
        match &e {
            RouterError::ProductNotFound(id) => {
                println!("{} No product with id '{}'", CROSS, style(id).red());
                warn!("{}", e);
            }
            RouterError::RouteError(_) | RouterError::NoActiveForm | RouterError::ViewError(_) => {
                println!("{} {}", CROSS, style(&e).red());
            }
            RouterError::CatalogError(_) => {
                println!("{} {}", CROSS, style(&e).red());
                error!("{}", e);
            }
        }
    }

    fn print_screen(&self) {
        for view in self.router.container().visible() {
            println!("{}", view.content);
        }
        let badge = self.router.cart_widget().content();
        if !badge.is_empty() {
            println!("{}", badge);
        }
    }

    fn print_cart(&self) {
        let cart = self.router.cart();
        if cart.is_empty() {
            println!("{} {}", CART, style("Cart is empty").dim());
            return;
        }

        println!("{} {}", CART, style("Cart").bold().cyan());
        for item in cart.items() {
            println!("{}", format_order_summary(&item.product, Some(&item)));
        }
        println!(
            "{} {} item(s), {}",
            style("Total:").bold(),
            cart.get_total_count(),
            style(format_price(cart.get_total_cost())).yellow()
        );
    }
}
