use bookchat_core::{ChatClient, Config, Conversation, DEFAULT_BASE_URL};
use tokio::task::JoinHandle;

/// The user-visible reply when the transport fails.
const FALLBACK_REPLY: &str = "❌ Something went wrong. Please try again.";

pub struct App {
    // Core state
    pub should_quit: bool,

    // Input line state
    pub input: String,
    pub cursor: usize, // cursor position in input, in chars

    // Conversation state
    pub conversation: Conversation,
    pub reply_task: Option<JoinHandle<anyhow::Result<String>>>,
    pub fallback_reply: String,

    // Chat viewport state (inner sizes, updated during render)
    pub chat_scroll: u16,
    pub chat_height: u16,
    pub chat_width: u16,

    // Animation state
    pub animation_frame: u8, // 0-2 for ellipsis animation

    client: ChatClient,
}

impl App {
    pub fn new() -> Self {
        // Load config
        let config = Config::load().unwrap_or_else(|_| Config::new());

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let fallback_reply = config
            .fallback_reply
            .clone()
            .unwrap_or_else(|| FALLBACK_REPLY.to_string());

        Self {
            should_quit: false,

            input: String::new(),
            cursor: 0,

            conversation: Conversation::new(),
            reply_task: None,
            fallback_reply,

            chat_scroll: 0,
            chat_height: 0,
            chat_width: 0,

            animation_frame: 0,

            client: ChatClient::new(&base_url),
        }
    }

    /// Submit the current input line.
    ///
    /// No-op while a reply is pending or when the input is blank; otherwise
    /// the question goes into the conversation and the network call runs on a
    /// background task so the UI keeps drawing.
    pub fn submit(&mut self) {
        let Some(history) = self.conversation.begin_exchange(&self.input) else {
            return;
        };

        let question = std::mem::take(&mut self.input);
        self.cursor = 0;

        let client = self.client.clone();
        self.reply_task = Some(tokio::spawn(async move {
            client.ask(&question, &history).await
        }));

        // Scroll to bottom so "Thinking..." is visible
        self.scroll_chat_to_bottom();
    }

    /// Collect a finished reply task, if any, and append its outcome.
    ///
    /// A transport error or a dead task both resolve to the fallback reply;
    /// the conversation always gains exactly one assistant entry per
    /// question.
    pub async fn poll_reply(&mut self) {
        if !self.reply_task.as_ref().is_some_and(|task| task.is_finished()) {
            return;
        }
        let Some(task) = self.reply_task.take() else {
            return;
        };

        let reply = match task.await {
            Ok(Ok(reply)) => reply,
            Ok(Err(_)) | Err(_) => self.fallback_reply.clone(),
        };

        self.conversation.complete_exchange(reply);
        self.scroll_chat_to_bottom();
    }

    /// Tick animation frame (called by Tick event)
    pub fn tick_animation(&mut self) {
        if self.conversation.is_pending() {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.chat_scroll = self.chat_scroll.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.chat_scroll = self.chat_scroll.saturating_add(lines);
    }

    /// Scroll the chat so the latest message (or the thinking indicator) is
    /// visible.
    pub fn scroll_chat_to_bottom(&mut self) {
        // Use actual chat width for wrap calculation, default to 50 if not set
        let wrap_width = if self.chat_width > 0 {
            self.chat_width as usize
        } else {
            50
        };

        let mut total_lines: u16 = 0;

        for msg in self.conversation.all() {
            total_lines += 1; // Role line ("You:" or "BookBot:")
            for line in msg.content.lines() {
                // Use character count, not byte length, for proper UTF-8 handling
                let char_count = line.chars().count();
                if char_count == 0 {
                    total_lines += 1; // Empty line still takes one line
                } else {
                    total_lines += ((char_count / wrap_width) + 1) as u16;
                }
            }
            total_lines += 1; // Blank line after message
        }

        if self.conversation.is_pending() {
            total_lines += 2; // "BookBot:" + "Thinking..."
        }

        let visible_height = if self.chat_height > 0 {
            self.chat_height
        } else {
            20
        };

        if total_lines > visible_height {
            self.chat_scroll = total_lines.saturating_sub(visible_height);
        } else {
            self.chat_scroll = 0;
        }
    }
}
