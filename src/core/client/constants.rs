//! Centralized constants for the default endpoint, UA and query documents.

/// Default desktop UA to avoid trivial bot blocking.
pub(crate) const USER_AGENT: &str = concat!(
    "Mozilla/5.0 (X11; Linux x86_64) ",
    "AppleWebKit/537.36 (KHTML, like Gecko) ",
    "Chrome/122.0.0.0 Safari/537.36"
);

/// Web GraphQL endpoint.
pub(crate) const DEFAULT_BASE_GRAPHQL: &str = "https://www.facebook.com/api/graphql/";

/// Origin header the endpoint expects on form posts.
pub(crate) const DEFAULT_ORIGIN: &str = "https://www.facebook.com";

/// `ProfileCometTimelineFeedRefetchQuery`
pub(crate) const DOC_TIMELINE_FEED: &str = "25430544756617998";

/// `GroupsCometFeedRegularStoriesPaginationQuery`
pub(crate) const DOC_GROUP_FEED: &str = "25716860671307636";

/// `CommentsListComponentsPaginationQuery`
pub(crate) const DOC_COMMENTS: &str = "25550760954572974";

/// `Depth1CommentsListPaginationQuery`
pub(crate) const DOC_REPLIES: &str = "26570577339199586";

/// `CometPhotoRootContentQuery`
pub(crate) const DOC_PHOTO_VIEWER: &str = "26168653472729001";
