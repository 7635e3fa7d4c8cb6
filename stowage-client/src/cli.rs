//! Command-line front end: argument parsing, command dispatch and rendering.

use crate::api_client::ApiClient;
use crate::behaviors::{list_page_config, ListBehavior};
use crate::config::ClientConfig;
use crate::error::AppError;
use crate::types::TransitionRequest;
use std::fmt::Write as _;
use std::sync::Arc;
use stowage_core::{
    BuildingDisplay, ContainerDisplay, DestinationType, EntityId, EntityKind, FurnitureDisplay,
    ItemDisplay, ListFilters, PageItem, PlaceDisplay, RoomDisplay, SortDirection,
};
use stowage_list::{ListPage, ListSnapshot};
use tracing::info;

pub const USAGE: &str = "stowage [--config PATH] <kind> [--query Q] [--page N] [--sort FIELD] \
[--asc|--desc] [--show-deleted]\n       stowage <kind> delete|restore <id>\n       \
stowage <kind> move <id> <place|container|room|furniture> <destination-id>";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListArgs {
    pub query: Option<String>,
    pub page: Option<u32>,
    pub sort_by: Option<String>,
    pub direction: Option<SortDirection>,
    pub show_deleted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List(ListArgs),
    Delete(EntityId),
    Restore(EntityId),
    Move {
        id: EntityId,
        destination_type: DestinationType,
        destination_id: EntityId,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub kind: EntityKind,
    pub command: Command,
}

impl CliArgs {
    /// Parses everything after the program name. `--config PATH` is accepted
    /// and ignored here; [`ClientConfig::load`] reads it.
    pub fn parse<I>(args: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut positional = Vec::new();
        let mut list = ListArgs::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    required_value(&mut args, "--config")?;
                }
                "--query" => list.query = Some(required_value(&mut args, "--query")?),
                "--page" => {
                    let raw = required_value(&mut args, "--page")?;
                    list.page = Some(parse_number(&raw, "--page")?);
                }
                "--sort" => list.sort_by = Some(required_value(&mut args, "--sort")?),
                "--asc" => list.direction = Some(SortDirection::Asc),
                "--desc" => list.direction = Some(SortDirection::Desc),
                "--show-deleted" => list.show_deleted = true,
                flag if flag.starts_with("--") => {
                    return Err(AppError::Usage(format!("unknown option {}", flag)));
                }
                _ => positional.push(arg),
            }
        }

        let mut positional = positional.into_iter();
        let kind: EntityKind = positional
            .next()
            .ok_or_else(|| AppError::Usage(USAGE.to_string()))?
            .parse()?;

        let command = match positional.next().as_deref() {
            None => Command::List(list),
            Some("delete") => Command::Delete(next_id(&mut positional, "id")?),
            Some("restore") => Command::Restore(next_id(&mut positional, "id")?),
            Some("move") => {
                let id = next_id(&mut positional, "id")?;
                let destination_type: DestinationType = positional
                    .next()
                    .ok_or_else(|| AppError::Usage("move needs a destination type".to_string()))?
                    .parse()?;
                let destination_id = next_id(&mut positional, "destination id")?;
                Command::Move {
                    id,
                    destination_type,
                    destination_id,
                }
            }
            Some(other) => return Err(AppError::Usage(format!("unknown command {}", other))),
        };
        if let Some(extra) = positional.next() {
            return Err(AppError::Usage(format!("unexpected argument {}", extra)));
        }
        Ok(Self { kind, command })
    }
}

fn required_value(
    args: &mut impl Iterator<Item = String>,
    flag: &str,
) -> Result<String, AppError> {
    args.next()
        .ok_or_else(|| AppError::Usage(format!("{} needs a value", flag)))
}

fn parse_number<T: std::str::FromStr>(raw: &str, what: &str) -> Result<T, AppError> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::Usage(format!("{} must be a number, got '{}'", what, raw)))
}

fn next_id(args: &mut impl Iterator<Item = String>, what: &str) -> Result<EntityId, AppError> {
    let raw = args
        .next()
        .ok_or_else(|| AppError::Usage(format!("missing {}", what)))?;
    parse_number(&raw, what)
}

/// Runs one parsed command and returns what should be printed.
pub async fn run(api: &ApiClient, config: &ClientConfig, args: &CliArgs) -> Result<String, AppError> {
    match &args.command {
        Command::List(list) => match args.kind {
            EntityKind::Item => run_list::<ItemDisplay>(api, config, list).await,
            EntityKind::Place => run_list::<PlaceDisplay>(api, config, list).await,
            EntityKind::Container => run_list::<ContainerDisplay>(api, config, list).await,
            EntityKind::Room => run_list::<RoomDisplay>(api, config, list).await,
            EntityKind::Building => run_list::<BuildingDisplay>(api, config, list).await,
            EntityKind::Furniture => run_list::<FurnitureDisplay>(api, config, list).await,
        },
        Command::Delete(id) => {
            let ok = api.rest().soft_delete(args.kind, *id).await?;
            info!(kind = %args.kind, id, ok, "soft delete");
            Ok(outcome(ok, "Удалено", "Не удалось удалить"))
        }
        Command::Restore(id) => {
            let ok = api.rest().restore(args.kind, *id).await?;
            info!(kind = %args.kind, id, ok, "restore");
            Ok(outcome(ok, "Восстановлено", "Не удалось восстановить"))
        }
        Command::Move {
            id,
            destination_type,
            destination_id,
        } => {
            let request = TransitionRequest::new(args.kind, *id, *destination_type, *destination_id)?;
            api.rest().create_transition(&request).await?;
            info!(
                kind = %args.kind,
                id,
                destination_type = %destination_type,
                destination_id,
                "transition recorded"
            );
            Ok("Перемещено".to_string())
        }
    }
}

fn outcome(ok: bool, done: &str, failed: &str) -> String {
    let message = if ok { done } else { failed };
    message.to_string()
}

/// Drives a list page through the requested sort, filter, search and page and
/// renders the settled result.
pub async fn run_list<E: ListBehavior>(
    api: &ApiClient,
    config: &ClientConfig,
    args: &ListArgs,
) -> Result<String, AppError> {
    let mut page_config = list_page_config::<E>(Arc::clone(api.rest()), config);
    if args.show_deleted {
        page_config = page_config.with_initial_filters(E::default_filters().with_show_deleted(true));
    }
    let default_by = page_config.sort.default_by;
    let page = ListPage::new(page_config)?;

    if args.sort_by.is_some() || args.direction.is_some() {
        page.set_sort(
            args.sort_by.as_deref().unwrap_or(default_by),
            args.direction.unwrap_or_default(),
        );
    }

    let query = args.query.as_deref().map(str::trim).unwrap_or_default();
    if !query.is_empty() {
        let mut updates = page.subscribe();
        page.set_search_query(query);
        // A closed channel means the page is gone; `settled` below reports
        // whatever state it reached.
        let _ = updates
            .wait_for(|snapshot| snapshot.query == query && !snapshot.is_loading)
            .await;
    }

    if let Some(number) = args.page {
        page.set_page(number);
    }

    let snapshot = page.settled().await;
    if let Some(error) = &snapshot.error {
        return Err(AppError::Fetch(error.clone()));
    }
    Ok(render_list(&page, &snapshot))
}

/// One line per row, then the count label and the page strip.
pub fn render_list<E: ListBehavior>(page: &ListPage<E>, snapshot: &ListSnapshot<E>) -> String {
    let mut out = String::new();
    for entity in &snapshot.data {
        let marker = if entity.is_deleted() { " (удалено)" } else { "" };
        let _ = writeln!(out, "{:>6}  {}{}", entity.id(), page.display_name(entity), marker);
    }
    if snapshot.data.is_empty() {
        out.push_str("Ничего не найдено\n");
    }
    let _ = writeln!(out, "{}", page.count_label());
    out.push_str(&render_pages(snapshot.page, &page.pages()));
    out
}

/// `"1 … 4 [5] 6 … 10"`
pub fn render_pages(current: u32, pages: &[PageItem]) -> String {
    pages
        .iter()
        .map(|item| match item {
            PageItem::Page(n) if *n == current => format!("[{}]", n),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Result<CliArgs, AppError> {
        CliArgs::parse(raw.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_list_options() {
        let parsed = args(&[
            "--config", "/tmp/stowage.toml", "rooms", "--query", "кух", "--page", "2", "--sort",
            "name", "--asc", "--show-deleted",
        ])
        .unwrap();
        assert_eq!(parsed.kind, EntityKind::Room);
        assert_eq!(
            parsed.command,
            Command::List(ListArgs {
                query: Some("кух".to_string()),
                page: Some(2),
                sort_by: Some("name".to_string()),
                direction: Some(SortDirection::Asc),
                show_deleted: true,
            })
        );
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(args(&["item", "delete", "4"]).unwrap().command, Command::Delete(4));
        assert_eq!(
            args(&["containers", "move", "7", "room", "3"]).unwrap().command,
            Command::Move {
                id: 7,
                destination_type: DestinationType::Room,
                destination_id: 3,
            }
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(args(&[]), Err(AppError::Usage(_))));
        assert!(matches!(args(&["gadgets"]), Err(AppError::Parse(_))));
        assert!(matches!(args(&["item", "--page", "two"]), Err(AppError::Usage(_))));
        assert!(matches!(args(&["item", "--verbose"]), Err(AppError::Usage(_))));
        assert!(matches!(args(&["item", "delete"]), Err(AppError::Usage(_))));
        assert!(matches!(args(&["item", "restore", "1", "2"]), Err(AppError::Usage(_))));
    }

    #[test]
    fn test_render_pages_marks_current() {
        let pages = stowage_core::pagination_pages(5, 10);
        assert_eq!(render_pages(5, &pages), "1 … 4 [5] 6 … 10");
    }
}
