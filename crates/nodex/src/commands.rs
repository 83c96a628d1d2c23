//! Command execution.
//!
//! Every command writes its result to the supplied writer so the binary can
//! target stdout and tests can capture output.

use anyhow::{Context, Result};
use futures::StreamExt;
use nodex_assistant::{
    AssistantClient, Conversation, OpenFile, apply_file_operations, build_system_prompt,
    framework, parse_file_operations,
};
use nodex_core::{Error, GraphData, NodexConfig, Point, ViewState};
use nodex_graph::{GraphStats, LinkGraph, apply_view_filters, get_graph_stats};
use nodex_parser::{NoteTemplate, create_note_content};
use nodex_vault::Vault;
use nodex_views::{JsonFileStore, ViewStore};
use std::collections::BTreeMap;
use std::io::{BufRead, Write};
use tracing::instrument;

use crate::cli::{AskArgs, Command, GraphArgs, NoteArgs, ViewsCommand};

/// An opened vault plus the configuration it was opened with
pub struct App {
    config: NodexConfig,
    vault: Vault,
}

impl App {
    /// Open the configured vault
    pub fn new(config: NodexConfig) -> Result<Self> {
        let vault = Vault::open(&config).context("Failed to open vault")?;
        Ok(Self { config, vault })
    }

    pub fn config(&self) -> &NodexConfig {
        &self.config
    }

    pub fn vault(&self) -> &Vault {
        &self.vault
    }

    /// Run one command
    #[instrument(skip(self, out), name = "nodex_run")]
    pub async fn run<W: Write>(&self, command: Command, out: &mut W) -> Result<()> {
        match command {
            Command::Graph(args) => self.graph(&args, out).await,
            Command::Stats { json } => self.stats(json, out).await,
            Command::Links { path } => self.links(&path, out).await,
            Command::Summary { path } => self.summary(&path, out).await,
            Command::Tree => {
                writeln!(out, "{}", self.vault.structure_text().await?)?;
                Ok(())
            }
            Command::Note(args) => self.note(&args, out).await,
            Command::Views(cmd) => self.views(cmd, out).await,
            Command::Ask(args) => self.ask(&args, out).await,
            Command::Chat { framework } => {
                let stdin = std::io::stdin();
                self.chat(framework.as_deref(), stdin.lock(), out).await
            }
        }
    }

    fn view_store(&self) -> Result<(JsonFileStore, ViewStore)> {
        let kv = JsonFileStore::new(self.config.views_path()?);
        let views = ViewStore::load(&kv)?;
        Ok((kv, views))
    }

    async fn render_graph<W: Write>(&self, view: Option<&ViewState>, out: &mut W) -> Result<()> {
        let graph = self.vault.build_graph().await?;
        let rendered = apply_view_filters(&graph, view);
        writeln!(out, "{}", serde_json::to_string_pretty(&rendered)?)?;
        Ok(())
    }

    async fn graph<W: Write>(&self, args: &GraphArgs, out: &mut W) -> Result<()> {
        let mut state = match &args.view {
            Some(id) => {
                let (_, views) = self.view_store()?;
                let view = views.get(id).ok_or_else(|| Error::not_found(format!("view {}", id)))?;
                view.state.clone()
            }
            None => ViewState::default(),
        };
        state.hide_orphans |= args.hide_orphans;
        self.render_graph(Some(&state), out).await
    }

    async fn stats<W: Write>(&self, json: bool, out: &mut W) -> Result<()> {
        let graph = self.vault.build_graph().await?;
        let stats = get_graph_stats(&graph);
        if json {
            writeln!(out, "{}", serde_json::to_string_pretty(&stats)?)?;
        } else {
            write_stats(&stats, &graph, out)?;
        }
        Ok(())
    }

    async fn links<W: Write>(&self, path: &str, out: &mut W) -> Result<()> {
        let graph = self.vault.build_graph().await?;
        if graph.node(path).is_none() {
            return Err(Error::file_not_found(path).into());
        }
        let links = LinkGraph::from(&graph);
        write_list(out, "Forward links", &links.forward_links(path))?;
        write_list(out, "Backlinks", &links.backlinks(path))?;
        Ok(())
    }

    async fn summary<W: Write>(&self, path: &str, out: &mut W) -> Result<()> {
        let doc = self.vault.document(path).await?;
        writeln!(out, "{} ({})", doc.short_name(), doc.note_type())?;
        let tags = doc.tags();
        if !tags.is_empty() {
            writeln!(out, "Tags: {}", tags.join(", "))?;
        }
        let links = doc.wiki_links();
        if !links.is_empty() {
            writeln!(out, "Links: {}", links.join(", "))?;
        }
        writeln!(out)?;
        writeln!(out, "{}", doc.summary(self.vault.summary_length()))?;
        Ok(())
    }

    async fn note<W: Write>(&self, args: &NoteArgs, out: &mut W) -> Result<()> {
        let template = NoteTemplate::new(args.title.as_str())
            .with_type(args.note_type.as_str())
            .with_body(args.body.as_str());
        if args.print {
            write!(out, "{}", create_note_content(&template))?;
        } else {
            let path = self.vault.create_note(&args.dir, &template).await?;
            writeln!(out, "Created {}", path)?;
        }
        Ok(())
    }

    async fn views<W: Write>(&self, command: ViewsCommand, out: &mut W) -> Result<()> {
        let (kv, mut views) = self.view_store()?;
        match command {
            ViewsCommand::List => {
                if views.is_empty() {
                    writeln!(out, "No saved views")?;
                }
                for view in views.views() {
                    writeln!(out, "{}\t{}\t{}", view.id, view.name, view.created_at)?;
                }
            }
            ViewsCommand::Create {
                name,
                hide_orphans,
                zoom,
                pan_x,
                pan_y,
            } => {
                let state = ViewState::new(BTreeMap::new(), zoom, Point::new(pan_x, pan_y), hide_orphans);
                let id = views.create(name, state);
                views.save(&kv)?;
                writeln!(out, "{}", id)?;
            }
            ViewsCommand::Delete { id } => {
                views.delete(&id);
                views.save(&kv)?;
                writeln!(out, "Deleted {}", id)?;
            }
            ViewsCommand::Select { id } => {
                views.select(&id)?;
                if let Some(view) = views.get(&id) {
                    let state = &view.state;
                    writeln!(out, "{} ({})", view.name, view.id)?;
                    writeln!(out, "Created: {}", view.created_at)?;
                    writeln!(out, "Zoom: {}", state.zoom)?;
                    writeln!(out, "Pan: {}, {}", state.pan.x, state.pan.y)?;
                    writeln!(out, "Hide orphans: {}", state.hide_orphans)?;
                    writeln!(out, "Positions: {}", state.positions.len())?;
                }
            }
            ViewsCommand::Apply { id } => {
                views.apply(&id)?;
                let state = views.active_view().map(|v| v.state.clone());
                self.render_graph(state.as_ref(), out).await?;
            }
            ViewsCommand::Clear => {
                let ids: Vec<String> = views.views().iter().map(|v| v.id.clone()).collect();
                for id in &ids {
                    views.delete(id);
                }
                views.save(&kv)?;
                let count = ids.len();
                writeln!(out, "Deleted {} views", count)?;
            }
            ViewsCommand::Show => {
                writeln!(out, "{}", serde_json::to_string_pretty(views.views())?)?;
            }
        }
        Ok(())
    }

    async fn system_prompt(&self, framework_id: Option<&str>, file: Option<&str>) -> Result<String> {
        let structure = self.vault.structure_text().await?;
        let open_file = match file {
            Some(path) => Some(OpenFile {
                path: path.to_string(),
                content: self.vault.storage().read_text(path).await?,
            }),
            None => None,
        };
        let mode = framework(framework_id.unwrap_or(&self.config.assistant.framework));
        log::debug!("Using assistant framework {}", mode.id);
        Ok(build_system_prompt(&structure, open_file.as_ref(), mode))
    }

    /// Stream one reply to `out`, recording it in the conversation
    async fn exchange<W: Write>(
        &self,
        client: &AssistantClient,
        system: &str,
        conversation: &mut Conversation,
        out: &mut W,
    ) -> Result<String> {
        let mut stream = client.stream_reply(system, conversation.messages()).await?;
        let mut reply = String::new();
        while let Some(fragment) = stream.next().await {
            let fragment = fragment?;
            write!(out, "{}", fragment)?;
            out.flush()?;
            reply.push_str(&fragment);
        }
        writeln!(out)?;
        conversation.push_assistant(reply.as_str());
        Ok(reply)
    }

    async fn handle_operations<W: Write>(&self, reply: &str, apply: bool, out: &mut W) -> Result<()> {
        let operations = parse_file_operations(reply);
        if operations.is_empty() {
            return Ok(());
        }
        if apply {
            for path in apply_file_operations(self.vault.storage(), &operations).await? {
                writeln!(out, "Applied: {}", path)?;
            }
        } else {
            writeln!(
                out,
                "{} file operation(s) proposed; rerun with --apply to write them",
                operations.len()
            )?;
        }
        Ok(())
    }

    async fn ask<W: Write>(&self, args: &AskArgs, out: &mut W) -> Result<()> {
        let client = AssistantClient::new(self.config.assistant.clone())?;
        let system = self
            .system_prompt(args.framework.as_deref(), args.file.as_deref())
            .await?;

        let mut conversation = Conversation::new();
        conversation.push_user(args.message.as_str());
        let reply = self.exchange(&client, &system, &mut conversation, out).await?;
        self.handle_operations(&reply, args.apply, out).await
    }

    /// Multi-turn session reading one message per input line
    pub async fn chat<R: BufRead, W: Write>(
        &self,
        framework_id: Option<&str>,
        input: R,
        out: &mut W,
    ) -> Result<()> {
        let client = AssistantClient::new(self.config.assistant.clone())?;
        let mut conversation = Conversation::new();

        for line in input.lines() {
            let message = line?;
            let message = message.trim();
            if message.is_empty() {
                continue;
            }
            // Rebuilt per turn so notes created earlier in the session appear
            let system = self.system_prompt(framework_id, None).await?;
            conversation.push_user(message);
            match self.exchange(&client, &system, &mut conversation, out).await {
                Ok(reply) => self.handle_operations(&reply, true, out).await?,
                Err(e) => {
                    conversation.discard_unanswered();
                    writeln!(out, "Error: {:#}", e)?;
                }
            }
        }
        Ok(())
    }
}

fn write_list<W: Write>(out: &mut W, title: &str, items: &[&str]) -> std::io::Result<()> {
    writeln!(out, "{}:", title)?;
    if items.is_empty() {
        writeln!(out, "  (none)")?;
    }
    for item in items {
        writeln!(out, "  {}", item)?;
    }
    Ok(())
}

fn write_stats<W: Write>(stats: &GraphStats, graph: &GraphData, out: &mut W) -> std::io::Result<()> {
    writeln!(out, "Notes: {}", stats.node_count)?;
    writeln!(out, "Links: {}", stats.edge_count)?;
    writeln!(out, "Orphans: {}", stats.orphan_count)?;
    writeln!(out, "Avg connections: {}", stats.avg_connections_display())?;
    let links = LinkGraph::from(graph);
    writeln!(out, "Clusters: {}", links.clusters().len())?;
    writeln!(out, "Cycles: {}", links.cycles().len())?;
    if !stats.most_connected.is_empty() {
        writeln!(out, "Most connected:")?;
        for node in &stats.most_connected {
            writeln!(out, "  {} ({})", node.label, node.connections)?;
        }
    }
    if !stats.orphans.is_empty() {
        writeln!(out, "Orphan notes: {}", stats.orphans.join(", "))?;
    }
    Ok(())
}
