//! Emitting messages about instant events to the presentation layer

use crate::prelude::*;

/// Game event messages for displaying.
#[derive(Clone, PartialEq, Debug)]
pub enum Msg {
    /// Text message.
    Message(String),

    /// Entity took damage.
    Hurt(Entity, i32),

    /// Creature died at location.
    Death(Location),

    /// Entity started showing a different emote.
    Emote(Entity, Emote),
}

impl Runtime {
    pub fn send_msg(&mut self, msg: Msg) {
        if let Msg::Message(text) = &msg {
            log::debug!("msg: {text}");
        }
        self.msgs.push(msg);
    }

    /// Drain the messages emitted since the last call.
    pub fn take_msgs(&mut self) -> Vec<Msg> {
        std::mem::take(&mut self.msgs)
    }
}

/// Format a text message and send it to the runtime.
#[macro_export]
macro_rules! msg {
    // NB. Even the simple cases needs to be wrapped in `format!` in case the
    // fmt string is doing named variable capture.
    ($r:expr; $fmt:expr) => {
        $r.send_msg($crate::Msg::Message(format!($fmt)))
    };

    ($r:expr; $fmt:expr, $($arg:expr),*) => {
        let __txt = format!($fmt, $($arg),*);
        $r.send_msg($crate::Msg::Message(__txt))
    };
}
