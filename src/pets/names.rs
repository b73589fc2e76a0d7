//! Flavour attribute pool for generated pets.

/// (name, description) pairs. Purely cosmetic.
pub const ATTRIBUTE_POOL: [(&str, &str); 16] = [
    ("Playful", "Can't resist chasing anything that moves."),
    ("Lazy", "Naps through most of the day and half of the night."),
    ("Curious", "Pokes its nose into every open channel."),
    ("Loyal", "Follows you from server to server."),
    ("Grumpy", "Tolerates you. Barely."),
    ("Gluttonous", "Treats disappear the moment they are offered."),
    ("Shy", "Hides behind the member list when strangers appear."),
    ("Brave", "Stares down moderators without blinking."),
    ("Noisy", "Somehow always unmuted."),
    ("Elegant", "Moves with the grace of a well-formatted embed."),
    ("Clumsy", "Knocks reactions off messages."),
    ("Mischievous", "Has been seen pinging @everyone."),
    ("Sleepy", "Yawns every time someone says good morning."),
    ("Clever", "Solved the puzzle channel before you did."),
    ("Affectionate", "Leaves a trail of heart reactions."),
    ("Stubborn", "Refuses to leave the voice channel."),
];
