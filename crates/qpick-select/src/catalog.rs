//! Built-in item lists.

/// Sixty-four animals, one per 6-bit sample.
pub const ANIMALS: [&str; 64] = [
    "Lion", "Tiger", "Elephant", "Giraffe", "Zebra", "Hippo", "Rhino", "Cheetah",
    "Leopard", "Jaguar", "Puma", "Lynx", "Ocelot", "Serval", "Caracal", "Bobcat",
    "Wolf", "Fox", "Bear", "Panda", "Koala", "Kangaroo", "Wallaby", "Wombat",
    "Platypus", "Echidna", "Sloth", "Armadillo", "Anteater", "Pangolin", "Aardvark", "Meerkat",
    "Mongoose", "Ferret", "Otter", "Seal", "Walrus", "Dolphin", "Whale", "Shark",
    "Octopus", "Squid", "Jellyfish", "Starfish", "Crab", "Lobster", "Shrimp", "Seahorse",
    "Butterfly", "Dragonfly", "Bee", "Ant", "Beetle", "Ladybug", "Grasshopper", "Cricket",
    "Spider", "Scorpion", "Centipede", "Millipede", "Snail", "Slug", "Earthworm", "Firefly",
];
