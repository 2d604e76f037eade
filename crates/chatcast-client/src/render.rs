use chatcast_core::{Message, User};

/// Render one received message. The local user's own messages are labelled "You".
pub fn render_line(local: &User, msg: &Message) -> String {
    let who = if msg.is_from(local) { "You" } else { msg.user.name.as_str() };
    format!("{who} : {}", msg.content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn own_messages_render_as_you() {
        let me = User::new("1", "Ann");
        let other = User::new("2", "Bo");
        assert_eq!(render_line(&me, &Message::new(me.clone(), "hi", "")), "You : hi");
        assert_eq!(render_line(&me, &Message::new(other, "yo", "")), "Bo : yo");
    }
}
