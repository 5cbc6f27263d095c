//! Shell command table and argument parsing.
//!
//! Each input line is parsed into a [`Command`] before anything is sent.
//! Malformed arguments become `Error::Argument` carrying the command's usage
//! line, so a bad line never reaches the network.

use std::str::FromStr;

use serde_json::{Map, Value};
use strum::{EnumIter, EnumMessage, EnumString, IntoStaticStr};

use crate::api_client::{ApiClient, PathParam, Query};
use crate::error::{Error, Result};

/// Every command the shell understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, EnumIter, IntoStaticStr, EnumMessage)]
#[strum(serialize_all = "snake_case")]
pub enum CommandName {
    #[strum(
        message = "Test connectivity and return information about you",
        detailed_message = "whoami"
    )]
    Whoami,
    #[strum(message = "Get a list of MRR rig servers", detailed_message = "get_servers")]
    GetServers,
    #[strum(message = "Get all algos and statistics for them", detailed_message = "get_algos")]
    GetAlgos,
    #[strum(message = "Get statistics for an algo by name", detailed_message = "get_algo <algo_name>")]
    GetAlgo,
    #[strum(message = "Get a list of currencies", detailed_message = "get_currencies")]
    GetCurrencies,
    #[strum(message = "Retrieve account information", detailed_message = "get_account")]
    GetAccount,
    #[strum(message = "Retrieve account balances", detailed_message = "get_account_balance")]
    GetAccountBalance,
    #[strum(
        message = "List/search transaction history",
        detailed_message = "get_account_transactions [<JSON filters>]"
    )]
    GetAccountTransactions,
    #[strum(
        message = "List all pool profiles, or list by algo",
        detailed_message = "get_account_profile [<JSON filters>]"
    )]
    GetAccountProfile,
    #[strum(
        message = "Create a pool profile",
        detailed_message = "create_account_profile [<JSON data>]"
    )]
    CreateAccountProfile,
    #[strum(
        message = "Get a specific pool profile",
        detailed_message = "get_specific_profile <profile_id>"
    )]
    GetSpecificProfile,
    #[strum(
        message = "Update a specific pool profile",
        detailed_message = "update_account_profile <profile_id> <JSON data>"
    )]
    UpdateAccountProfile,
    #[strum(
        message = "Delete a specific pool profile",
        detailed_message = "delete_account_profile <profile_id>"
    )]
    DeleteAccountProfile,
    #[strum(
        message = "Test a pool for connectivity and functionality",
        detailed_message = "test_pool [<JSON params>]"
    )]
    TestPool,
    #[strum(message = "Retrieve current pricing information", detailed_message = "get_pricing")]
    GetPricing,
    #[strum(
        message = "Get information on rentals by rental ID",
        detailed_message = "get_rental <ID1>[;<ID2>...]"
    )]
    GetRental,
    #[strum(message = "Create a new rental", detailed_message = "create_rental <JSON data>")]
    CreateRental,
    #[strum(
        message = "Apply a pool profile to one or more rentals",
        detailed_message = "apply_profile_to_rental <rental_ids> <profile_id>"
    )]
    ApplyProfileToRental,
    #[strum(
        message = "List pools assigned to one or more rentals",
        detailed_message = "get_rental_pools <rental_ids>"
    )]
    GetRentalPools,
    #[strum(
        message = "Add or replace a pool on one or more rentals",
        detailed_message = "add_replace_pool_on_rental <rental_ids> <JSON data>"
    )]
    AddReplacePoolOnRental,
    #[strum(
        message = "Delete a pool on one or more rentals",
        detailed_message = "delete_pool_on_rental <rental_ids>"
    )]
    DeletePoolOnRental,
    #[strum(
        message = "Purchase an extension on one or more rentals",
        detailed_message = "purchase_extension_on_rental <rental_ids> <JSON data>"
    )]
    PurchaseExtensionOnRental,
    #[strum(
        message = "Obtain rental graph information",
        detailed_message = "get_rental_graph <rental_ids>"
    )]
    GetRentalGraph,
    #[strum(
        message = "Obtain 'Activity Log' detail messages on rentals",
        detailed_message = "get_rental_log <rental_ids>"
    )]
    GetRentalLog,
    #[strum(
        message = "Obtain messages on one or more of your rentals",
        detailed_message = "get_rental_messages <rental_ids>"
    )]
    GetRentalMessages,
    #[strum(
        message = "Send a message to one or more of your rentals",
        detailed_message = "send_message_to_rental <rental_ids> <message>"
    )]
    SendMessageToRental,
    #[strum(
        message = "List available commands with \"help\" or detailed help with \"help cmd\"",
        detailed_message = "help [<command>]"
    )]
    Help,
    #[strum(message = "Exit the application", detailed_message = "exit")]
    Exit,
}

impl CommandName {
    pub fn name(self) -> &'static str {
        self.into()
    }

    pub fn description(self) -> &'static str {
        self.get_message().unwrap_or_default()
    }

    pub fn usage(self) -> &'static str {
        self.get_detailed_message().unwrap_or_else(|| self.name())
    }
}

/// A parsed input line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Api(ApiCommand),
    /// Optional topic to describe
    Help(Option<String>),
    Exit,
}

/// A command that makes exactly one API call.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCommand {
    Whoami,
    Servers,
    Algos,
    Algo(PathParam),
    Currencies,
    Account,
    AccountBalance,
    AccountTransactions(Query),
    AccountProfiles(Query),
    CreateAccountProfile(Value),
    AccountProfile(PathParam),
    UpdateAccountProfile(PathParam, Value),
    DeleteAccountProfile(PathParam),
    TestPool(Query),
    Pricing,
    Rentals(PathParam),
    CreateRental(Value),
    ApplyProfileToRentals {
        rentals: PathParam,
        profile: PathParam,
    },
    RentalPools(PathParam),
    AddReplaceRentalPool(PathParam, Value),
    DeleteRentalPool(PathParam),
    ExtendRental(PathParam, Value),
    RentalGraph(PathParam),
    RentalLog(PathParam),
    RentalMessages(PathParam),
    SendRentalMessage(PathParam, String),
}

impl Command {
    /// Parse one input line.
    ///
    /// Returns `Ok(None)` for a blank line.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (word, rest) = match line.strip_prefix('?') {
            Some(topic) => ("help", topic.trim()),
            None => match line.split_once(char::is_whitespace) {
                Some((word, rest)) => (word, rest.trim()),
                None => (line, ""),
            },
        };
        let name = CommandName::from_str(word)
            .map_err(|_| Error::UnknownCommand(line.to_string()))?;
        let args = Args {
            usage: name.usage(),
            rest,
        };

        use CommandName as N;
        let api = match name {
            N::Help => return Ok(Some(Command::Help((!rest.is_empty()).then(|| rest.to_string())))),
            N::Exit => return Ok(Some(Command::Exit)),
            N::Whoami => ApiCommand::Whoami,
            N::GetServers => ApiCommand::Servers,
            N::GetAlgos => ApiCommand::Algos,
            N::GetAlgo => ApiCommand::Algo(args.single("algo name")?),
            N::GetCurrencies => ApiCommand::Currencies,
            N::GetAccount => ApiCommand::Account,
            N::GetAccountBalance => ApiCommand::AccountBalance,
            N::GetAccountTransactions => ApiCommand::AccountTransactions(args.query()?),
            N::GetAccountProfile => ApiCommand::AccountProfiles(args.query()?),
            N::CreateAccountProfile => ApiCommand::CreateAccountProfile(args.optional_json()?),
            N::GetSpecificProfile => ApiCommand::AccountProfile(args.single("profile ID")?),
            N::UpdateAccountProfile => {
                let (id, data) = args.split_first()?;
                ApiCommand::UpdateAccountProfile(id.single("profile ID")?, data.required_json()?)
            }
            N::DeleteAccountProfile => ApiCommand::DeleteAccountProfile(args.single("profile ID")?),
            N::TestPool => ApiCommand::TestPool(args.query()?),
            N::GetPricing => ApiCommand::Pricing,
            N::GetRental => ApiCommand::Rentals(args.ids()?),
            N::CreateRental => ApiCommand::CreateRental(args.required_json()?),
            N::ApplyProfileToRental => {
                let (ids, profile) = args.split_first()?;
                ApiCommand::ApplyProfileToRentals {
                    rentals: ids.ids()?,
                    profile: profile.single("profile ID")?,
                }
            }
            N::GetRentalPools => ApiCommand::RentalPools(args.ids()?),
            N::AddReplacePoolOnRental => {
                let (ids, data) = args.split_first()?;
                ApiCommand::AddReplaceRentalPool(ids.ids()?, data.required_json()?)
            }
            N::DeletePoolOnRental => ApiCommand::DeleteRentalPool(args.ids()?),
            N::PurchaseExtensionOnRental => {
                let (ids, data) = args.split_first()?;
                ApiCommand::ExtendRental(ids.ids()?, data.required_json()?)
            }
            N::GetRentalGraph => ApiCommand::RentalGraph(args.ids()?),
            N::GetRentalLog => ApiCommand::RentalLog(args.ids()?),
            N::GetRentalMessages => ApiCommand::RentalMessages(args.ids()?),
            N::SendMessageToRental => {
                let (ids, message) = args.split_first()?;
                ApiCommand::SendRentalMessage(ids.ids()?, message.rest.to_string())
            }
        };

        Ok(Some(Command::Api(api)))
    }
}

impl ApiCommand {
    /// Issue this command's request.
    pub async fn dispatch(&self, client: &ApiClient) -> Result<Value> {
        match self {
            ApiCommand::Whoami => client.whoami().await,
            ApiCommand::Servers => client.servers().await,
            ApiCommand::Algos => client.algos().await,
            ApiCommand::Algo(name) => client.algo(name).await,
            ApiCommand::Currencies => client.currencies().await,
            ApiCommand::Account => client.account().await,
            ApiCommand::AccountBalance => client.account_balance().await,
            ApiCommand::AccountTransactions(filters) => {
                client.account_transactions(filters.clone()).await
            }
            ApiCommand::AccountProfiles(filters) => client.account_profiles(filters.clone()).await,
            ApiCommand::CreateAccountProfile(profile) => {
                client.create_account_profile(profile.clone()).await
            }
            ApiCommand::AccountProfile(id) => client.account_profile(id).await,
            ApiCommand::UpdateAccountProfile(id, profile) => {
                client.update_account_profile(id, profile.clone()).await
            }
            ApiCommand::DeleteAccountProfile(id) => client.delete_account_profile(id).await,
            ApiCommand::TestPool(params) => client.test_pool(params.clone()).await,
            ApiCommand::Pricing => client.pricing().await,
            ApiCommand::Rentals(ids) => client.rentals(ids).await,
            ApiCommand::CreateRental(rental) => client.create_rental(rental.clone()).await,
            ApiCommand::ApplyProfileToRentals { rentals, profile } => {
                client.apply_profile_to_rentals(rentals, profile).await
            }
            ApiCommand::RentalPools(ids) => client.rental_pools(ids).await,
            ApiCommand::AddReplaceRentalPool(ids, pool) => {
                client.add_replace_rental_pool(ids, pool.clone()).await
            }
            ApiCommand::DeleteRentalPool(ids) => client.delete_rental_pool(ids).await,
            ApiCommand::ExtendRental(ids, extension) => {
                client.extend_rental(ids, extension.clone()).await
            }
            ApiCommand::RentalGraph(ids) => client.rental_graph(ids).await,
            ApiCommand::RentalLog(ids) => client.rental_log(ids).await,
            ApiCommand::RentalMessages(ids) => client.rental_messages(ids).await,
            ApiCommand::SendRentalMessage(ids, message) => {
                client.send_rental_message(ids, message).await
            }
        }
    }
}

// Remaining argument text for one command, plus the usage line to report
// when it does not parse.
#[derive(Clone, Copy)]
struct Args<'a> {
    usage: &'static str,
    rest: &'a str,
}

impl<'a> Args<'a> {
    fn error(&self, reason: impl Into<String>) -> Error {
        Error::Argument {
            reason: reason.into(),
            usage: self.usage,
        }
    }

    fn single(&self, what: &str) -> Result<PathParam> {
        if self.rest.is_empty() {
            return Err(self.error(format!("missing {what}")));
        }
        PathParam::single(self.rest).ok_or_else(|| {
            self.error(format!(
                "invalid {what} {:?}: use letters, digits, '.', '_' or '-'",
                self.rest
            ))
        })
    }

    fn ids(&self) -> Result<PathParam> {
        if self.rest.is_empty() {
            return Err(self.error("missing rental IDs"));
        }
        PathParam::list(self.rest).ok_or_else(|| {
            self.error(format!(
                "invalid rental IDs {:?}: separate IDs with ';' and no spaces",
                self.rest
            ))
        })
    }

    /// Split off the first token. The remainder must not be empty.
    fn split_first(&self) -> Result<(Args<'a>, Args<'a>)> {
        let (first, rest) = self
            .rest
            .split_once(char::is_whitespace)
            .map(|(first, rest)| (first, rest.trim()))
            .filter(|(_, rest)| !rest.is_empty())
            .ok_or_else(|| self.error("expected two arguments"))?;

        Ok((
            Args {
                usage: self.usage,
                rest: first,
            },
            Args {
                usage: self.usage,
                rest,
            },
        ))
    }

    fn required_json(&self) -> Result<Value> {
        if self.rest.is_empty() {
            return Err(self.error("missing JSON data"));
        }
        serde_json::from_str(self.rest).map_err(|e| self.error(format!("invalid JSON: {e}")))
    }

    /// JSON value, or an empty object when no argument is given.
    fn optional_json(&self) -> Result<Value> {
        if self.rest.is_empty() {
            return Ok(Value::Object(Map::new()));
        }
        self.required_json()
    }

    /// Flat JSON object turned into query parameters. Null values are
    /// dropped; other scalars are rendered as text.
    fn query(&self) -> Result<Query> {
        let Value::Object(map) = self.optional_json()? else {
            return Err(self.error("expected a JSON object"));
        };

        let mut query = Query::new();
        for (key, value) in map {
            let text = match value {
                Value::Null => continue,
                Value::String(s) => s,
                Value::Bool(b) => b.to_string(),
                Value::Number(n) => n.to_string(),
                Value::Array(_) | Value::Object(_) => {
                    return Err(self.error(format!(
                        "parameter {key:?} must be a string, number or boolean"
                    )))
                }
            };
            query.insert(key, text);
        }
        Ok(query)
    }
}
