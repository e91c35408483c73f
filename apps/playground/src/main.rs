use loom_canvas::input::{InputState, Key, PointerButtons};
use loom_canvas::math::flatten_bezier;
use loom_canvas::render::DrawCommand;
use loomflow_core::{
    ClientConfig, ClientError, ConfigPreset, ConfigProvider, HttpWorkflowClient, NodeKind,
    WorkflowStore, WorkflowTemplate,
};
use loomflow_inspector::{PropertyPanel, PLACEHOLDER_TEXT};
use loomflow_sdk::WorkflowEditor;
use macroquad::prelude as mq;
use serde_json::Value;
use tokio::runtime::Runtime;
use tokio::task::JoinHandle;

const PANEL_WIDTH: f32 = 320.0;
const TEMPLATE_NAME: &str = "rag_chat";
const WORKFLOW_NAME: &str = "playground";

const PALETTE: [(mq::KeyCode, NodeKind); 7] = [
    (mq::KeyCode::Key1, NodeKind::Llm),
    (mq::KeyCode::Key2, NodeKind::Rag),
    (mq::KeyCode::Key3, NodeKind::Code),
    (mq::KeyCode::Key4, NodeKind::Condition),
    (mq::KeyCode::Key5, NodeKind::Http),
    (mq::KeyCode::Key6, NodeKind::Variable),
    (mq::KeyCode::Key7, NodeKind::Template),
];

/// A server round-trip running on the tokio runtime.
enum Pending {
    Configs(JoinHandle<Result<Vec<ConfigPreset>, ClientError>>),
    Template(JoinHandle<Result<WorkflowTemplate, ClientError>>),
    Save(JoinHandle<Result<Value, ClientError>>),
}

impl Pending {
    fn is_finished(&self) -> bool {
        match self {
            Pending::Configs(h) => h.is_finished(),
            Pending::Template(h) => h.is_finished(),
            Pending::Save(h) => h.is_finished(),
        }
    }
}

#[macroquad::main("LoomFlow Playground")]
async fn main() {
    tracing_subscriber::fmt::init();
    if let Err(e) = run().await {
        tracing::error!(error = %e, "Playground exited with an error");
    }
}

async fn run() -> anyhow::Result<()> {
    let rt = Runtime::new()?;
    let client = HttpWorkflowClient::new(ClientConfig::from_env()?);
    tracing::info!(server = %client.base_url(), "Starting LoomFlow playground");

    let mut editor = WorkflowEditor::with_server(client.clone());
    let mut pending = vec![spawn_configs(&rt, &client)];
    let mut status = String::from("1-7 add node | T template | S save | C presets | O toggle schema | X clear | panel is read-only");

    loop {
        let screen_w = mq::screen_width();
        let screen_h = mq::screen_height();
        let canvas_size = glam::Vec2::new(screen_w - PANEL_WIDTH, screen_h);
        editor.canvas.update_viewport_size(canvas_size);

        // Apply finished server calls.
        let (done, still_running): (Vec<_>, Vec<_>) =
            pending.into_iter().partition(Pending::is_finished);
        pending = still_running;
        for job in done {
            status = apply_result(&rt, &mut editor, job);
        }

        // Editor commands
        for (key, kind) in PALETTE.iter() {
            if mq::is_key_pressed(*key) {
                if let Err(e) = editor.add_node(kind.clone()) {
                    status = e.to_string();
                }
            }
        }
        if mq::is_key_pressed(mq::KeyCode::T) {
            let client = client.clone();
            pending.push(Pending::Template(
                rt.spawn(async move { client.fetch_template(TEMPLATE_NAME).await }),
            ));
            status = format!("Loading template '{TEMPLATE_NAME}'...");
        }
        if mq::is_key_pressed(mq::KeyCode::S) {
            let client = client.clone();
            let snapshot = editor.snapshot();
            pending.push(Pending::Save(rt.spawn(async move {
                client.save_workflow(WORKFLOW_NAME, &snapshot).await
            })));
            status = "Saving...".to_string();
        }
        if mq::is_key_pressed(mq::KeyCode::C) {
            pending.push(spawn_configs(&rt, &client));
        }
        if mq::is_key_pressed(mq::KeyCode::X) {
            editor.clear_all();
        }
        if mq::is_key_pressed(mq::KeyCode::O) {
            toggle_structured_output(&mut editor);
        }

        let input = read_input(canvas_size);
        let draw_list = editor.handle_input(&input, mq::get_frame_time());

        mq::clear_background(mq::DARKGRAY);
        draw_commands(draw_list);
        draw_panel(editor.panel(), screen_w, screen_h);
        mq::draw_text(&status, 10.0, screen_h - 12.0, 18.0, mq::WHITE);

        mq::next_frame().await
    }
}

fn spawn_configs(rt: &Runtime, client: &HttpWorkflowClient) -> Pending {
    let client = client.clone();
    Pending::Configs(rt.spawn(async move { client.list_configs().await }))
}

fn apply_result(rt: &Runtime, editor: &mut WorkflowEditor, job: Pending) -> String {
    match job {
        Pending::Configs(handle) => match rt.block_on(handle) {
            Ok(Ok(presets)) => {
                let message = format!("Loaded {} config presets", presets.len());
                editor.set_presets(presets);
                message
            }
            Ok(Err(e)) => format!("Loading presets failed: {e}"),
            Err(e) => format!("Loading presets failed: {e}"),
        },
        Pending::Template(handle) => match rt.block_on(handle) {
            Ok(Ok(template)) => {
                let message = format!(
                    "Loaded template {}",
                    template.name.as_deref().unwrap_or(TEMPLATE_NAME)
                );
                editor.load_graph(template.graph);
                message
            }
            Ok(Err(e)) => format!("Loading template failed: {e}"),
            Err(e) => format!("Loading template failed: {e}"),
        },
        Pending::Save(handle) => match rt.block_on(handle) {
            Ok(Ok(ack)) => {
                tracing::info!(%ack, "Save acknowledged");
                "Workflow saved".to_string()
            }
            Ok(Err(e)) => format!("Save failed: {e}"),
            Err(e) => format!("Save failed: {e}"),
        },
    }
}

fn toggle_structured_output(editor: &mut WorkflowEditor) {
    let Some(id) = editor.selected_node_id().map(str::to_string) else {
        return;
    };
    let Some(node) = editor.node(&id) else {
        return;
    };
    if node.data.node_type != NodeKind::Llm {
        return;
    }
    let next = !node.data.flag("enable_structured_output");
    if let Err(e) = editor.update_node_field(&id, "enable_structured_output", &next.to_string()) {
        tracing::warn!(error = %e, "Toggle failed");
    }
}

fn read_input(canvas_size: glam::Vec2) -> InputState {
    let (mx, my) = mq::mouse_position();
    let wheel = mq::mouse_wheel().1;

    let buttons = PointerButtons {
        primary: mq::is_mouse_button_down(mq::MouseButton::Left),
        middle: mq::is_mouse_button_down(mq::MouseButton::Middle),
    };

    let mut pressed_keys = Vec::new();
    if mq::is_key_pressed(mq::KeyCode::Delete) {
        pressed_keys.push(Key::Delete);
    }
    if mq::is_key_pressed(mq::KeyCode::Backspace) {
        pressed_keys.push(Key::Backspace);
    }
    if mq::is_key_pressed(mq::KeyCode::Escape) {
        pressed_keys.push(Key::Escape);
    }

    InputState {
        pointer_pos: glam::Vec2::new(mx, my),
        buttons,
        scroll_delta: if wheel == 0.0 { 0.0 } else { wheel.signum() },
        pressed_keys,
        screen_size: canvas_size,
        // The property panel owns clicks on its side of the window.
        event_consumed_by_content: mx > canvas_size.x,
    }
}

fn color(c: glam::Vec4) -> mq::Color {
    mq::Color::new(c.x, c.y, c.z, c.w)
}

fn draw_commands(draw_list: Vec<DrawCommand>) {
    for cmd in draw_list {
        match cmd {
            DrawCommand::Rect {
                pos,
                size,
                color: fill,
                stroke_width,
                stroke_color,
                ..
            } => {
                mq::draw_rectangle(pos.x, pos.y, size.x, size.y, color(fill));
                if let Some(sc) = stroke_color {
                    mq::draw_rectangle_lines(pos.x, pos.y, size.x, size.y, stroke_width, color(sc));
                }
            }
            DrawCommand::Circle {
                center,
                radius,
                color: fill,
                stroke_color,
            } => {
                mq::draw_circle(center.x, center.y, radius, color(fill));
                if let Some(sc) = stroke_color {
                    mq::draw_circle_lines(center.x, center.y, radius, 1.0, color(sc));
                }
            }
            DrawCommand::Line {
                start,
                end,
                color: c,
                width,
            } => {
                mq::draw_line(start.x, start.y, end.x, end.y, width, color(c));
            }
            DrawCommand::Bezier {
                start,
                cp1,
                cp2,
                end,
                color: c,
                width,
            } => {
                let points = flatten_bezier(start, cp1, cp2, end, 24);
                for pair in points.windows(2) {
                    mq::draw_line(pair[0].x, pair[0].y, pair[1].x, pair[1].y, width, color(c));
                }
            }
            DrawCommand::Text {
                pos,
                text,
                color: c,
                size,
            } => {
                mq::draw_text(&text, pos.x, pos.y, size, color(c));
            }
        }
    }
}

fn draw_panel(panel: &PropertyPanel, screen_w: f32, screen_h: f32) {
    let x = screen_w - PANEL_WIDTH;
    mq::draw_rectangle(x, 0.0, PANEL_WIDTH, screen_h, mq::Color::new(0.12, 0.12, 0.14, 1.0));

    let mut y = 28.0;
    let mut line = |text: &str, size: f32, c: mq::Color| {
        mq::draw_text(text, x + 12.0, y, size, c);
        y += size + 6.0;
    };

    let Some(inspector) = panel.inspector() else {
        line(PLACEHOLDER_TEXT, 18.0, mq::LIGHTGRAY);
        return;
    };

    line(&inspector.type_label, 24.0, mq::WHITE);
    line(&format!("ID: {}", inspector.node_id), 16.0, mq::LIGHTGRAY);

    for field in inspector.visible_fields() {
        let shown = inspector.display(&field.id);
        let first = shown.lines().next().unwrap_or_default();
        let clipped: String = first.chars().take(28).collect();
        line(&format!("{}: {}", field.label, clipped), 16.0, mq::WHITE);
    }

    line("Connections:", 18.0, mq::LIGHTGRAY);
    for summary in inspector.connection_summary() {
        line(&summary, 16.0, mq::WHITE);
    }
}
