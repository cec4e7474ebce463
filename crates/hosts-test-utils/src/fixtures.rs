//! Sample hosts files.

/// Loopback block, a named block with a disabled entry, and a stray line.
pub const ANNOTATED: &str = "\
# Static table lookup for hostnames.
# See hosts(5) for details.

# [1] system - loopback names
127.0.0.1       localhost
::1             localhost ip6-localhost ip6-loopback

# [20] lab - machines in the lab
10.0.0.10       printer.lab   # second floor
10.0.0.11       nas.lab
# 10.0.0.12     old-nas.lab

not a hosts line
";

/// A plain hosts file with no block headers.
pub const PLAIN: &str = "\
127.0.0.1 localhost
10.1.1.1 web.local api.local
";

/// Windows-style line endings.
pub const CRLF: &str = "# [1] base\r\n127.0.0.1 localhost\r\n";
