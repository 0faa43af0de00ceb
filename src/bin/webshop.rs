//! Command-line front end for the storefront client.

use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use config::Config;
use dotenvy::dotenv;

use webshop_client::api::rest::RestApi;
use webshop_client::domain::auth::Session;
use webshop_client::domain::product::{Category, Product};
use webshop_client::domain::sort::SortSpec;
use webshop_client::domain::types::{CategoryId, ProductId};
use webshop_client::domain::user::{Address, UserProfile};
use webshop_client::dto::listing::ListingPageData;
use webshop_client::dto::search::SearchPageData;
use webshop_client::forms::auth::{LoginForm, RegistrationForm};
use webshop_client::forms::profile::UpdateProfileForm;
use webshop_client::forms::search::SearchForm;
use webshop_client::models::config::ClientConfig;
use webshop_client::services::{self, ServiceError, ServiceResult};
use webshop_client::settings::JsonFileSettings;

#[derive(Parser)]
#[command(version, about = "Storefront client: browse products and manage the account")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// List the categories shown on the landing page
    Categories,
    /// Browse a category with the saved sort order and page
    List {
        category: String,
        /// Switch the sort order, e.g. price.DESC
        #[arg(long)]
        sort: Option<SortSpec>,
        /// Jump to a zero-based page index
        #[arg(long)]
        page: Option<usize>,
        /// Move one page forward
        #[arg(long, default_value_t = false)]
        next: bool,
        /// Move one page back
        #[arg(long, default_value_t = false)]
        prev: bool,
    },
    /// Search products by name with optional filters
    Search {
        query: String,
        #[arg(long)]
        min_price: Option<u32>,
        #[arg(long)]
        max_price: Option<u32>,
        #[arg(long)]
        in_stock: Option<bool>,
        /// Minimum rating, snaps back to 1 outside 1..=5
        #[arg(long)]
        min_rate: Option<u8>,
        /// Maximum rating, snaps back to 5 outside 1..=5
        #[arg(long)]
        max_rate: Option<u8>,
    },
    /// Turn the page of an earlier search using its query string
    SearchPage {
        params: String,
        /// Page backwards instead of forwards
        #[arg(long, default_value_t = false)]
        back: bool,
    },
    /// Show one product
    Product { id: String },
    /// Sign in and cache the session token
    Login { username: String, password: String },
    /// Drop the cached session token
    Logout,
    /// Create an account from a JSON payload file
    Register {
        payload: PathBuf,
        /// Copy the shipping address over the billing address
        #[arg(long, default_value_t = false)]
        billing_same_as_shipping: bool,
    },
    /// Show the signed-in user's profile
    Profile,
    /// Edit the profile: print a template, or submit a JSON payload file
    UpdateProfile { payload: Option<PathBuf> },
    /// Check whether the cached session token is still accepted
    Status,
}

fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let cli = Cli::parse();

    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let settings = Config::builder()
        // Add `./config/default.yaml`
        .add_source(config::File::with_name("config/default"))
        // Add environment-specific overrides
        .add_source(config::File::with_name(&format!("config/{}", app_env)).required(false))
        // Add settings from the environment (with a prefix of APP)
        .add_source(config::Environment::with_prefix("APP"))
        .build();

    let settings = match settings {
        Ok(settings) => settings,
        Err(err) => {
            log::error!("Error loading settings: {}", err);
            std::process::exit(1);
        }
    };

    let client_config = match settings.try_deserialize::<ClientConfig>() {
        Ok(client_config) => client_config,
        Err(err) => {
            log::error!("Error loading client config: {}", err);
            std::process::exit(1);
        }
    };

    let api = match RestApi::new(
        &client_config.api_base_url,
        Duration::from_secs(client_config.timeout_secs),
    ) {
        Ok(api) => api,
        Err(err) => {
            log::error!("Failed to build the API client: {err}");
            std::process::exit(1);
        }
    };

    let store = JsonFileSettings::new(&client_config.settings_path);
    let mut session = load_session(&client_config.session_path);

    let outcome = run(cli.cmd, &api, &store, &mut session);

    // Commands may sign the session in or out; persist either way.
    save_session(&client_config.session_path, &session);

    if let Err(err) = outcome {
        match &err {
            ServiceError::Form(message) | ServiceError::Conflict(message) => {
                eprintln!("{message}");
            }
            ServiceError::Unauthorized => eprintln!("Bejelentkezés szükséges"),
            ServiceError::NotFound => eprintln!("A termék nem létezik"),
            other => eprintln!("{other}"),
        }
        std::process::exit(1);
    }
}

fn run(
    cmd: Cmd,
    api: &RestApi,
    store: &JsonFileSettings,
    session: &mut Session,
) -> ServiceResult<()> {
    match cmd {
        Cmd::Categories => {
            let data = services::home::load_home_page(api).map_err(|err| {
                log::error!("Failed to load home page: {err}");
                ServiceError::Form("Hiba a kategóriák lekérdezése során".to_string())
            })?;
            for category in &data.categories {
                print_category(category);
            }
            Ok(())
        }
        Cmd::List {
            category,
            sort,
            page,
            next,
            prev,
        } => {
            let category = CategoryId::new(category)?;
            let result = if let Some(order_by) = sort {
                services::listing::change_listing_sort(api, store, &category, order_by)
            } else if let Some(index) = page {
                services::listing::goto_listing_page(api, store, &category, index)
            } else if next {
                services::listing::next_listing_page(api, store, &category)
            } else if prev {
                services::listing::previous_listing_page(api, store, &category)
            } else {
                services::listing::load_listing_page(api, store, &category)
            };

            let data = result.map_err(|err| {
                log::error!("Failed to load the product listing: {err}");
                ServiceError::Form("Hiba a termékek lekérdezése során".to_string())
            })?;
            print_listing(&data);
            Ok(())
        }
        Cmd::Search {
            query,
            min_price,
            max_price,
            in_stock,
            min_rate,
            max_rate,
        } => {
            let mut form = SearchForm::new(query);
            form.min_price = min_price;
            form.max_price = max_price;
            form.in_stock = in_stock;
            if min_rate.is_some() {
                form.set_min_rate(min_rate);
            }
            if max_rate.is_some() {
                form.set_max_rate(max_rate);
            }

            let data = services::search::run_search(api, form)?;
            print_search(&data);
            Ok(())
        }
        Cmd::SearchPage { params, back } => {
            let data = if back {
                services::search::previous_search_page(api, &params)?
            } else {
                services::search::next_search_page(api, &params)?
            };
            print_search(&data);
            Ok(())
        }
        Cmd::Product { id } => {
            let id = ProductId::new(id)?;
            let data = services::product::load_product_page(api, &id).map_err(|err| {
                log::error!("Failed to load the product page: {err}");
                ServiceError::NotFound
            })?;
            print_product(&data.product);
            Ok(())
        }
        Cmd::Login { username, password } => {
            let form = LoginForm { username, password };
            services::auth::login(api, session, &form)?;
            println!("Sikeres bejelentkezés");
            Ok(())
        }
        Cmd::Logout => {
            services::auth::logout(api, session)?;
            println!("Kijelentkezve");
            Ok(())
        }
        Cmd::Register {
            payload,
            billing_same_as_shipping,
        } => {
            let raw = fs::read_to_string(&payload).map_err(|err| {
                log::error!("Failed to read {}: {err}", payload.display());
                ServiceError::Form("A bevitt adatok érvénytelenek".to_string())
            })?;
            let mut form: RegistrationForm = serde_json::from_str(&raw).map_err(|err| {
                log::error!("Failed to parse the registration payload: {err}");
                ServiceError::Form("A bevitt adatok érvénytelenek".to_string())
            })?;
            if billing_same_as_shipping {
                form.use_shipping_as_billing();
            }

            services::auth::register(api, form)?;
            println!("Sikeres Regisztráció!");
            Ok(())
        }
        Cmd::Profile => {
            let data = services::profile::load_profile_page(api, session)?;
            print_profile(&data.user);
            Ok(())
        }
        Cmd::UpdateProfile { payload } => match payload {
            Some(path) => {
                let raw = fs::read_to_string(&path).map_err(|err| {
                    log::error!("Failed to read {}: {err}", path.display());
                    ServiceError::Form("Helytelen bevitt adat".to_string())
                })?;
                let form: UpdateProfileForm = serde_json::from_str(&raw).map_err(|err| {
                    log::error!("Failed to parse the profile payload: {err}");
                    ServiceError::Form("Helytelen bevitt adat".to_string())
                })?;

                let data = services::profile::update_profile(api, session, form)?;
                print_profile(&data.user);
                Ok(())
            }
            None => {
                let form = services::profile::load_profile_form(api, session)?;
                let template = serde_json::to_string_pretty(&form).map_err(|err| {
                    log::error!("Failed to render the profile template: {err}");
                    ServiceError::Form("Nem sikerült módosítani az adatokat".to_string())
                })?;
                println!("{template}");
                Ok(())
            }
        },
        Cmd::Status => {
            if session.is_authenticated() {
                services::auth::validate_session(api, session)?;
            }
            println!("{session}");
            Ok(())
        }
    }
}

fn print_category(category: &Category) {
    println!(
        "{}\t{}\t{} termék",
        category.id, category.name, category.product_count
    );
}

fn print_product_line(product: &Product) {
    let stock = if product.in_stock() {
        "raktáron"
    } else {
        "elfogyott"
    };
    println!(
        "{}\t{}\t{} Ft\t{}/5\t{}",
        product.id, product.name, product.price, product.rating, stock
    );
}

fn print_listing(data: &ListingPageData) {
    for product in &data.page.items {
        print_product_line(product);
    }

    let strip: Vec<String> = data
        .page
        .pages
        .iter()
        .map(|page| match page {
            Some(number) => number.to_string(),
            None => "...".to_string(),
        })
        .collect();

    println!(
        "Oldal {}/{}, rendezés: {}",
        data.cursor.current_page(),
        data.cursor.total_pages(),
        data.order_by
    );
    if !strip.is_empty() {
        println!("Oldalak: {}", strip.join(" "));
    }
}

fn print_search(data: &SearchPageData) {
    for product in &data.products {
        print_product_line(product);
    }
    println!(
        "Oldal {}/{} ({} találat)",
        data.cursor.current_page(),
        data.cursor.total_pages(),
        data.cursor.total
    );
    println!("Keresés: {}", data.query_string);
}

fn print_product(product: &Product) {
    println!("{}", product.name);
    println!("Ár: {} Ft", product.price);
    println!("Értékelés: {}/5", product.rating);
    println!("Raktáron: {} db", product.stock);
    if !product.description.is_empty() {
        println!("{}", product.description);
    }
    if !product.categories.is_empty() {
        let names: Vec<&str> = product.categories.iter().map(|c| c.as_str()).collect();
        println!("Kategóriák: {}", names.join(", "));
    }
}

fn print_profile(user: &UserProfile) {
    println!("{} {} <{}>", user.first_name, user.last_name, user.email);
    if let Some(address) = &user.shipping_address {
        println!("Szállítási cím: {}", format_address(address));
    }
    if let Some(address) = &user.billing_address {
        println!("Számlázási cím: {}", format_address(address));
    }
}

fn format_address(address: &Address) -> String {
    let mut out = format!(
        "{}, {} {}, {} ({})",
        address.country, address.zip, address.city, address.street, address.name
    );
    if let Some(phone) = &address.phone_number {
        out.push_str(&format!(", tel: {phone}"));
    }
    if let Some(tax) = &address.tax_number {
        out.push_str(&format!(", adószám: {tax}"));
    }
    out
}

fn load_session(path: &str) -> Session {
    match fs::read_to_string(path) {
        Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
            log::warn!("Discarding unreadable session file {path}: {err}");
            Session::anonymous()
        }),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Session::anonymous(),
        Err(err) => {
            log::warn!("Failed to read session file {path}: {err}");
            Session::anonymous()
        }
    }
}

fn save_session(path: &str, session: &Session) {
    let raw = match serde_json::to_string_pretty(session) {
        Ok(raw) => raw,
        Err(err) => {
            log::error!("Failed to serialize the session: {err}");
            return;
        }
    };

    if let Err(err) = fs::write(path, raw) {
        log::error!("Failed to save session file {path}: {err}");
    }
}
