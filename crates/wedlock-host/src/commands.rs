//! Chat command layer
//!
//! Parses the marriage chat commands and runs them against the store,
//! producing translatable notices instead of text. Every command takes exactly
//! one player name:
//!
//! | Command | Aliases | Effect |
//! |---------|---------|--------|
//! | `/marry <player>` | `/heiraten` | Propose to an online player |
//! | `/divorce <player>` | `/scheiden` | Divorce your partner |
//! | `/heiraten-akzeptieren <player>` | `/marry-accept` | Accept their proposal (button) |
//! | `/heiraten-ablehnen <player>` | `/marry-deny` | Deny their proposal (button) |

use crate::PlayerDirectory;
use std::fmt;
use thiserror::Error;
use wedlock_domain::{ChatColor, PlayerId};
use wedlock_store::{Rejection, RelationshipStore};

/// Command word of the accept button
const ACCEPT_COMMAND: &str = "heiraten-akzeptieren";

/// Command word of the deny button
const DENY_COMMAND: &str = "heiraten-ablehnen";

/// Why a chat line is not a marriage command
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Nothing but whitespace
    #[error("empty command")]
    Empty,

    /// First word is not one of the marriage commands
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// The player argument is missing
    #[error("missing player name for /{0}")]
    MissingPlayer(String),

    /// More than one argument was given
    #[error("too many arguments for /{0}")]
    TooManyArguments(String),
}

/// A parsed marriage command and the player name it names
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    /// Propose to the named player
    Propose(String),
    /// Accept the named player's proposal
    Accept(String),
    /// Deny the named player's proposal
    Deny(String),
    /// Divorce the named player
    Divorce(String),
}

impl ChatCommand {
    /// Parse a chat line such as `/heiraten Alex` or `marry "Alex"`
    ///
    /// # Examples
    ///
    /// ```
    /// use wedlock_host::ChatCommand;
    ///
    /// assert_eq!(
    ///     ChatCommand::parse("/heiraten Alex").unwrap(),
    ///     ChatCommand::Propose("Alex".to_string())
    /// );
    /// assert!(ChatCommand::parse("/marry").is_err());
    /// ```
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let line = line.trim();
        let line = line.strip_prefix('/').unwrap_or(line);
        if line.is_empty() {
            return Err(ParseError::Empty);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let word = word.to_lowercase();

        let build: fn(String) -> ChatCommand = match word.as_str() {
            "marry" | "heiraten" => ChatCommand::Propose,
            "divorce" | "scheiden" => ChatCommand::Divorce,
            ACCEPT_COMMAND | "marry-accept" => ChatCommand::Accept,
            DENY_COMMAND | "marry-deny" => ChatCommand::Deny,
            _ => return Err(ParseError::UnknownCommand(word)),
        };

        let player = parse_player_argument(rest, &word)?;
        Ok(build(player))
    }

    /// The player name argument
    pub fn player(&self) -> &str {
        match self {
            ChatCommand::Propose(p)
            | ChatCommand::Accept(p)
            | ChatCommand::Deny(p)
            | ChatCommand::Divorce(p) => p,
        }
    }
}

impl fmt::Display for ChatCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let word = match self {
            ChatCommand::Propose(_) => "heiraten",
            ChatCommand::Accept(_) => ACCEPT_COMMAND,
            ChatCommand::Deny(_) => DENY_COMMAND,
            ChatCommand::Divorce(_) => "scheiden",
        };
        write!(f, "/{} {}", word, self.player())
    }
}

/// One argument: a bare word or a double-quoted string
fn parse_player_argument(rest: &str, word: &str) -> Result<String, ParseError> {
    if rest.is_empty() {
        return Err(ParseError::MissingPlayer(word.to_string()));
    }

    let player = match rest.strip_prefix('"').and_then(|r| r.strip_suffix('"')) {
        Some(quoted) => quoted,
        None if rest.contains(char::is_whitespace) => {
            return Err(ParseError::TooManyArguments(word.to_string()))
        }
        None => rest,
    };

    if player.is_empty() {
        return Err(ParseError::MissingPlayer(word.to_string()));
    }
    Ok(player.to_string())
}

/// Translatable messages the command layer can emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    /// Named player is not online
    PlayerNotFound,
    /// Sender tried to propose to themselves
    ProposeSelf,
    /// Sender is already married
    RequesterAlreadyMarried,
    /// Named player is already married (arg: name)
    TargetAlreadyMarried,
    /// Proposal delivered (arg: target name)
    ProposalSent,
    /// Proposal arrived (arg: requester name)
    ProposalReceived,
    /// The sender's earlier proposal was replaced by someone else's (arg: target name)
    ProposalSuperseded,
    /// Accept button label
    ProposalAccept,
    /// Accept button hover text
    ProposalAcceptHover,
    /// Deny button label
    ProposalDeny,
    /// Deny button hover text
    ProposalDenyHover,
    /// The proposing player went offline before the answer
    RequesterOffline,
    /// Broadcast of a new marriage (args: requester, target)
    MarriageSuccess,
    /// No proposal from the named player (arg: name as typed)
    NoPendingRequest,
    /// Confirmation to the player who denied
    ProposalDeniedTarget,
    /// Notice to the player who was denied (arg: target name)
    ProposalDeniedRequester,
    /// Sender is not married to the named player
    NotMarriedToPlayer,
    /// Broadcast of a divorce (args: sender, partner)
    DivorceSuccess,
}

impl MessageKey {
    /// Key into the host's language files
    pub fn translation_key(&self) -> &'static str {
        match self {
            MessageKey::PlayerNotFound => "chat.marriagemod.player_not_found",
            MessageKey::ProposeSelf => "chat.marriagemod.propose_self",
            MessageKey::RequesterAlreadyMarried => {
                "chat.marriagemod.requester_already_married"
            }
            MessageKey::TargetAlreadyMarried => "chat.marriagemod.target_already_married",
            MessageKey::ProposalSent => "chat.marriagemod.proposal_sent",
            MessageKey::ProposalReceived => "chat.marriagemod.proposal_received",
            MessageKey::ProposalSuperseded => "chat.marriagemod.proposal_superseded",
            MessageKey::ProposalAccept => "chat.marriagemod.proposal_accept",
            MessageKey::ProposalAcceptHover => "chat.marriagemod.proposal_accept_hover",
            MessageKey::ProposalDeny => "chat.marriagemod.proposal_deny",
            MessageKey::ProposalDenyHover => "chat.marriagemod.proposal_deny_hover",
            MessageKey::RequesterOffline => "chat.marriagemod.requester_offline",
            MessageKey::MarriageSuccess => "chat.marriagemod.marriage_success",
            MessageKey::NoPendingRequest => "chat.marriagemod.no_pending_request",
            MessageKey::ProposalDeniedTarget => "chat.marriagemod.proposal_denied_target",
            MessageKey::ProposalDeniedRequester => {
                "chat.marriagemod.proposal_denied_requester"
            }
            MessageKey::NotMarriedToPlayer => "chat.marriagemod.not_married_to_player",
            MessageKey::DivorceSuccess => "chat.marriagemod.divorce_success",
        }
    }

    /// English fallback text with `%s` placeholders, for hosts without language files
    pub fn english(&self) -> &'static str {
        match self {
            MessageKey::PlayerNotFound => "Player not found.",
            MessageKey::ProposeSelf => "You cannot marry yourself.",
            MessageKey::RequesterAlreadyMarried => "You are already married.",
            MessageKey::TargetAlreadyMarried => "%s is already married.",
            MessageKey::ProposalSent => "You proposed to %s.",
            MessageKey::ProposalReceived => "%s wants to marry you!",
            MessageKey::ProposalSuperseded => "Someone else proposed to %s; your proposal lapsed.",
            MessageKey::ProposalAccept => "[Accept]",
            MessageKey::ProposalAcceptHover => "Accept the proposal",
            MessageKey::ProposalDeny => "[Deny]",
            MessageKey::ProposalDenyHover => "Deny the proposal",
            MessageKey::RequesterOffline => "That player is no longer online.",
            MessageKey::MarriageSuccess => "%s and %s are now married!",
            MessageKey::NoPendingRequest => "You have no pending proposal from %s.",
            MessageKey::ProposalDeniedTarget => "You denied the proposal.",
            MessageKey::ProposalDeniedRequester => "%s denied your proposal.",
            MessageKey::NotMarriedToPlayer => "You are not married to that player.",
            MessageKey::DivorceSuccess => "%s and %s are now divorced.",
        }
    }
}

/// Who a notice is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    /// A single player
    Player(PlayerId),
    /// Every online player
    Everyone,
}

/// A clickable chat affordance that runs a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickAction {
    /// Button label
    pub label: MessageKey,
    /// Hover text
    pub hover: MessageKey,
    /// Label color
    pub color: ChatColor,
    /// Command run on click, with leading slash
    pub command: String,
}

/// A message for the host to deliver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Recipients
    pub audience: Audience,
    /// Message to translate
    pub key: MessageKey,
    /// Positional arguments, usually player names
    pub args: Vec<String>,
    /// Buttons shown on a line after the message
    pub actions: Vec<ClickAction>,
}

impl Notice {
    fn to(player: PlayerId, key: MessageKey, args: Vec<String>) -> Self {
        Self {
            audience: Audience::Player(player),
            key,
            args,
            actions: Vec::new(),
        }
    }

    fn broadcast(key: MessageKey, args: Vec<String>) -> Self {
        Self {
            audience: Audience::Everyone,
            key,
            args,
            actions: Vec::new(),
        }
    }

    /// English rendering of the message and its buttons
    pub fn render(&self) -> String {
        let mut text = self.key.english().to_string();
        for arg in &self.args {
            text = text.replacen("%s", arg, 1);
        }
        for action in &self.actions {
            text.push(' ');
            text.push_str(action.label.english());
        }
        text
    }
}

/// Result of running one command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutcome {
    /// Whether the command changed relationship state
    pub success: bool,
    /// Messages to deliver, in order
    pub notices: Vec<Notice>,
    /// Players whose displayed names must be refreshed
    pub refresh: Vec<PlayerId>,
}

impl CommandOutcome {
    fn failed(notice: Notice) -> Self {
        Self {
            success: false,
            notices: vec![notice],
            refresh: Vec::new(),
        }
    }
}

/// Runs parsed commands against a store
///
/// # Examples
///
/// ```
/// use wedlock_host::{ChatCommand, CommandDispatcher, MessageKey, StaticDirectory};
/// use wedlock_store::RelationshipStore;
///
/// let store = RelationshipStore::in_memory();
/// let mut players = StaticDirectory::new();
/// let steve = players.join("Steve");
/// let alex = players.join("Alex");
///
/// let dispatcher = CommandDispatcher::new(&store);
/// dispatcher.execute(steve, &ChatCommand::parse("/marry Alex").unwrap(), &players);
/// let accept = ChatCommand::parse("/heiraten-akzeptieren Steve").unwrap();
/// let outcome = dispatcher.execute(alex, &accept, &players);
///
/// assert!(outcome.success);
/// assert_eq!(outcome.notices[0].key, MessageKey::MarriageSuccess);
/// assert!(store.are_married(steve, alex));
/// ```
pub struct CommandDispatcher<'a> {
    store: &'a RelationshipStore,
}

impl<'a> CommandDispatcher<'a> {
    /// Dispatcher over `store`
    pub fn new(store: &'a RelationshipStore) -> Self {
        Self { store }
    }

    /// Run `command` on behalf of `sender`
    pub fn execute(
        &self,
        sender: PlayerId,
        command: &ChatCommand,
        directory: &dyn PlayerDirectory,
    ) -> CommandOutcome {
        tracing::debug!("{} ran {}", sender, command);
        match command {
            ChatCommand::Propose(name) => self.propose(sender, name, directory),
            ChatCommand::Accept(name) => self.accept(sender, name, directory),
            ChatCommand::Deny(name) => self.deny(sender, name, directory),
            ChatCommand::Divorce(name) => self.divorce(sender, name, directory),
        }
    }

    fn propose(
        &self,
        sender: PlayerId,
        name: &str,
        directory: &dyn PlayerDirectory,
    ) -> CommandOutcome {
        let Some(target) = directory.find_online(name) else {
            let notice = Notice::to(sender, MessageKey::PlayerNotFound, vec![]);
            return CommandOutcome::failed(notice);
        };
        let target_name = display_name(directory, target, name);

        let superseded = match self.store.propose(sender, target) {
            Ok(superseded) => superseded,
            Err(rejection) => return refusal(sender, rejection, Role::Requester, target_name),
        };

        let sender_name = display_name(directory, sender, "?");
        let mut notices = vec![Notice::to(
            sender,
            MessageKey::ProposalSent,
            vec![target_name.clone()],
        )];

        let mut received = Notice::to(
            target,
            MessageKey::ProposalReceived,
            vec![sender_name.clone()],
        );
        received.actions = vec![
            ClickAction {
                label: MessageKey::ProposalAccept,
                hover: MessageKey::ProposalAcceptHover,
                color: ChatColor::Green,
                command: ChatCommand::Accept(sender_name.clone()).to_string(),
            },
            ClickAction {
                label: MessageKey::ProposalDeny,
                hover: MessageKey::ProposalDenyHover,
                color: ChatColor::Red,
                command: ChatCommand::Deny(sender_name).to_string(),
            },
        ];
        notices.push(received);

        if let Some(earlier) = superseded.filter(|p| directory.is_online(*p)) {
            notices.push(Notice::to(
                earlier,
                MessageKey::ProposalSuperseded,
                vec![target_name],
            ));
        }

        CommandOutcome {
            success: true,
            notices,
            refresh: Vec::new(),
        }
    }

    fn accept(
        &self,
        sender: PlayerId,
        name: &str,
        directory: &dyn PlayerDirectory,
    ) -> CommandOutcome {
        let Some(requester) = directory.find_online(name) else {
            let notice = Notice::to(sender, MessageKey::RequesterOffline, vec![]);
            return CommandOutcome::failed(notice);
        };

        match self.store.accept(sender, requester) {
            Ok(_) => CommandOutcome {
                success: true,
                notices: vec![Notice::broadcast(
                    MessageKey::MarriageSuccess,
                    vec![
                        display_name(directory, requester, name),
                        display_name(directory, sender, "?"),
                    ],
                )],
                refresh: vec![requester, sender],
            },
            Err(rejection) => refusal(sender, rejection, Role::Target, name.to_string()),
        }
    }

    fn deny(
        &self,
        sender: PlayerId,
        name: &str,
        directory: &dyn PlayerDirectory,
    ) -> CommandOutcome {
        // An offline requester can still be denied by the name they had
        let requester = directory.find_online(name).or_else(|| {
            self.store.pending_proposal_for(sender).filter(|p| {
                directory
                    .name_of(*p)
                    .is_some_and(|known| known.eq_ignore_ascii_case(name))
            })
        });

        let Some(requester) = requester.filter(|r| self.store.deny(sender, *r)) else {
            return CommandOutcome::failed(Notice::to(
                sender,
                MessageKey::NoPendingRequest,
                vec![name.to_string()],
            ));
        };

        let denied = Notice::to(sender, MessageKey::ProposalDeniedTarget, vec![]);
        let mut notices = vec![denied];
        if directory.is_online(requester) {
            notices.push(Notice::to(
                requester,
                MessageKey::ProposalDeniedRequester,
                vec![display_name(directory, sender, "?")],
            ));
        }

        CommandOutcome {
            success: true,
            notices,
            refresh: Vec::new(),
        }
    }

    fn divorce(
        &self,
        sender: PlayerId,
        name: &str,
        directory: &dyn PlayerDirectory,
    ) -> CommandOutcome {
        let Some(target) = directory.find_online(name) else {
            let notice = Notice::to(sender, MessageKey::PlayerNotFound, vec![]);
            return CommandOutcome::failed(notice);
        };

        match self.store.divorce(sender, target) {
            Ok(_) => CommandOutcome {
                success: true,
                notices: vec![Notice::broadcast(
                    MessageKey::DivorceSuccess,
                    vec![
                        display_name(directory, sender, "?"),
                        display_name(directory, target, name),
                    ],
                )],
                refresh: vec![sender, target],
            },
            Err(rejection) => refusal(sender, rejection, Role::Requester, name.to_string()),
        }
    }
}

/// Which side of the transition the sender is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    /// Proposer, or the player asking for a divorce
    Requester,
    /// The player answering a proposal
    Target,
}

/// Notice for a refused transition, worded from the sender's side
fn refusal(sender: PlayerId, rejection: Rejection, role: Role, other: String) -> CommandOutcome {
    use Role::{Requester, Target};

    let (key, args) = match (rejection, role) {
        (Rejection::SelfTarget, _) => (MessageKey::ProposeSelf, vec![]),
        (Rejection::RequesterAlreadyMarried, Requester)
        | (Rejection::TargetAlreadyMarried, Target) => {
            (MessageKey::RequesterAlreadyMarried, vec![])
        }
        (Rejection::TargetAlreadyMarried, Requester)
        | (Rejection::RequesterAlreadyMarried, Target) => {
            (MessageKey::TargetAlreadyMarried, vec![other])
        }
        (Rejection::NoPendingProposal, _) => (MessageKey::NoPendingRequest, vec![other]),
        (Rejection::NotMarried, _) => (MessageKey::NotMarriedToPlayer, vec![]),
    };
    CommandOutcome::failed(Notice::to(sender, key, args))
}

fn display_name(directory: &dyn PlayerDirectory, player: PlayerId, fallback: &str) -> String {
    directory
        .name_of(player)
        .unwrap_or_else(|| fallback.to_string())
}
