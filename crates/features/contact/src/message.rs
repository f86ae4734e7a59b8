use crate::error::{ContactError, ContactErrorExt};
use lettre::Message;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;

/// A student's message to the administrators, fields already trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactMessage {
    /// Trims every field and rejects the message if any ends up empty.
    ///
    /// # Errors
    /// [`ContactError::MissingField`] naming the first empty field.
    pub fn new(name: &str, email: &str, message: &str) -> Result<Self, ContactError> {
        let name = required("name", name)?;
        let email = required("email", email)?;
        let message = required("message", message)?;
        Ok(Self { name, email, message })
    }

    #[must_use]
    pub fn subject(&self) -> String {
        format!("[Student Query] New message from {}", self.name)
    }

    #[must_use]
    pub fn body(&self) -> String {
        format!("Student Name: {}\nStudent Email: {}\n\nMessage:\n{}", self.name, self.email, self.message)
    }
}

fn required(field: &'static str, value: &str) -> Result<String, ContactError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ContactError::missing_field(field));
    }
    Ok(value.to_owned())
}

/// A fully addressed mail, independent of how it will be delivered.
#[derive(Debug, Clone)]
pub struct Outgoing {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub body: String,
}

impl Outgoing {
    /// One plain-text mail from `from` to all of `to`.
    ///
    /// # Errors
    /// [`ContactError::NoRecipients`] when `to` is empty.
    pub fn compose(from: &str, to: &[String], message: &ContactMessage) -> Result<Self, ContactError> {
        if to.is_empty() {
            return Err(ContactError::no_recipients());
        }
        Ok(Self { from: from.to_owned(), to: to.to_vec(), subject: message.subject(), body: message.body() })
    }

    /// # Errors
    /// [`ContactError::Address`] for an unparsable address, [`ContactError::Message`] if
    /// lettre refuses the message.
    pub fn to_message(&self) -> Result<Message, ContactError> {
        let from: Mailbox = self.from.parse::<Mailbox>().context(format!("sender {}", self.from))?;
        let mut builder = Message::builder().from(from).subject(self.subject.as_str()).header(ContentType::TEXT_PLAIN);

        for to in &self.to {
            let mailbox: Mailbox = to.parse::<Mailbox>().context(format!("recipient {to}"))?;
            builder = builder.to(mailbox);
        }

        Ok(builder.body(self.body.clone())?)
    }
}
