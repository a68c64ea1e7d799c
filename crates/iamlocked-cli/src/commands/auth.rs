//! Account commands backed by the local auth provider.

use clap::Subcommand;
use iamlocked_core::auth::{check_sign_in_fields, check_sign_up_fields};
use iamlocked_core::{AuthProvider, FederatedProvider, LocalAuthProvider, Profile};

use super::{open_store, print_json, CmdResult};

#[derive(Subcommand)]
pub enum AuthAction {
    /// Create an account and sign in
    SignUp {
        email: String,
        password: String,
        /// Full name
        #[arg(long)]
        name: String,
    },
    /// Sign in with email and password
    SignIn { email: String, password: String },
    /// Sign in with Google
    Google,
    /// Sign out
    SignOut,
    /// Show the signed-in user's profile
    Whoami,
}

pub fn run(action: AuthAction) -> CmdResult {
    let db = open_store()?;
    let provider = LocalAuthProvider::new(&db);

    match action {
        AuthAction::SignUp {
            email,
            password,
            name,
        } => {
            check_sign_up_fields(&email, &password, &name)?;
            let user = provider.sign_up_with_password(&email, &password, &name)?;
            print_json(&Profile::of(&user))
        }
        AuthAction::SignIn { email, password } => {
            check_sign_in_fields(&email, &password)?;
            let user = provider.sign_in_with_password(&email, &password)?;
            print_json(&Profile::of(&user))
        }
        AuthAction::Google => {
            let user = provider.sign_in_with_federated_provider(FederatedProvider::Google)?;
            print_json(&Profile::of(&user))
        }
        AuthAction::SignOut => {
            provider.sign_out()?;
            println!("signed out");
            Ok(())
        }
        AuthAction::Whoami => match provider.current_user() {
            Some(user) => print_json(&Profile::of(&user)),
            None => Err("not signed in".into()),
        },
    }
}
