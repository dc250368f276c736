use ocs_rs::{
    users::{ListOptions, Scope},
    Client,
};
use structopt::StructOpt;
use tracing_subscriber::EnvFilter;

#[derive(Debug, StructOpt)]
enum Opt {
    /// Work with users.
    Users(Users),
}

#[derive(Debug, StructOpt)]
enum Users {
    /// List the profile fields the current user may edit
    Fields,
    /// Get the current user
    Current,
    /// Get a user
    Get { id: String },
    /// List user ids
    List {
        #[structopt(long, short)]
        search: Option<String>,
        #[structopt(long, short)]
        limit: Option<u32>,
        #[structopt(long, short)]
        offset: Option<u32>,
    },
    /// Set a profile field
    Set {
        id: String,
        field: String,
        value: String,

        /// Also change who can see the field
        #[structopt(long)]
        scope: Option<Scope>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let opt = Opt::from_args();
    let client = Client::new()?;

    match opt {
        Opt::Users(users) => match users {
            Users::Fields => client
                .users()
                .editable_fields()
                .await?
                .into_data()
                .into_iter()
                .for_each(|field| {
                    println!("{}", field);
                }),
            Users::Current => println!("{:?}", client.users().current().await?),
            Users::Get { id } => println!("{:?}", client.users().get(&id).await?),
            Users::List {
                search,
                limit,
                offset,
            } => {
                let opts = ListOptions {
                    search,
                    limit,
                    offset,
                };
                for id in client.users().list(opts).await? {
                    println!("{}", id);
                }
            }
            Users::Set {
                id,
                field,
                value,
                scope,
            } => {
                client.users().set_field(&id, &field, value).await?;
                if let Some(scope) = scope {
                    client.users().set_scope(&id, &field, scope).await?;
                }
            }
        },
    };

    Ok(())
}
