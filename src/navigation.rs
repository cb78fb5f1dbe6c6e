//! This file defines the templates and a convenience function for creating the navigation bar.

use maud::{Markup, html};

use crate::endpoints;

/// Template for a link in the navigation bar.
///
/// It will change appearance if `is_current` is set to
/// `true`. Only one link should be set as active at any one time.
#[derive(Clone)]
struct Link<'a> {
    url: &'a str,
    title: &'a str,
    is_current: bool,
}

impl Link<'_> {
    fn into_html(self) -> Markup {
        let style = if self.is_current {
            "block py-2 px-3 text-white bg-indigo-700 rounded-sm lg:bg-transparent
        lg:text-indigo-700 lg:p-0 dark:text-white lg:dark:text-indigo-400"
        } else {
            "block py-2 px-3 text-gray-900 rounded-sm hover:bg-gray-100
        lg:hover:bg-transparent lg:border-0 lg:hover:text-indigo-700 lg:p-0
        dark:text-white lg:dark:hover:text-indigo-400 dark:hover:bg-gray-700
        dark:hover:text-white lg:dark:hover:bg-transparent"
        };

        html!( li { a href=(self.url) class=(style) { (self.title) } } )
    }
}

pub struct NavBar<'a> {
    links: Vec<Link<'a>>,
    /// The email of the signed-in user, shown next to the log-out link.
    identity: Option<&'a str>,
}

impl<'a> NavBar<'a> {
    /// Get the navigation bar.
    ///
    /// If a link matches `active_endpoint`, then that link will be
    /// marked as active and displayed differently in the HTML.
    pub fn new(active_endpoint: &str) -> NavBar<'_> {
        let links = vec![
            Link {
                url: endpoints::ROOT,
                title: "Home",
                is_current: active_endpoint == endpoints::ROOT,
            },
            Link {
                url: endpoints::TRANSACTIONS_VIEW,
                title: "Transactions",
                is_current: active_endpoint == endpoints::TRANSACTIONS_VIEW,
            },
            Link {
                url: endpoints::NEW_TRANSACTION_VIEW,
                title: "Add Transaction",
                is_current: active_endpoint == endpoints::NEW_TRANSACTION_VIEW,
            },
            Link {
                url: endpoints::REPORTS_VIEW,
                title: "Reports",
                is_current: active_endpoint == endpoints::REPORTS_VIEW,
            },
        ];

        NavBar {
            links,
            identity: None,
        }
    }

    /// Show `email` and a log-out link instead of the log-in link.
    pub fn with_identity(mut self, email: Option<&'a str>) -> Self {
        self.identity = email;
        self
    }

    pub fn into_html(self) -> Markup {
        let session_link = match self.identity {
            Some(_) => Link {
                url: endpoints::LOG_OUT,
                title: "Log out",
                is_current: false,
            },
            None => Link {
                url: endpoints::LOG_IN_VIEW,
                title: "Log in",
                is_current: false,
            },
        };

        html! {
            nav class="bg-white border-gray-200 dark:bg-gray-800 mb-4"
            {
                div class="max-w-screen-xl flex flex-wrap items-center justify-between mx-auto p-4"
                {
                    a href=(endpoints::ROOT) class="flex items-center space-x-3"
                    {
                        span class="self-center text-2xl font-semibold whitespace-nowrap text-indigo-700 dark:text-indigo-400"
                        {
                            "Masroofy"
                        }
                    }

                    div class="w-full lg:block lg:w-auto"
                    {
                        ul class="font-medium flex flex-col p-4 lg:p-0 mt-4 border
                            border-gray-100 rounded-lg lg:flex-row lg:space-x-8
                            rtl:space-x-reverse lg:mt-0 lg:border-0 dark:border-gray-700"
                        {
                            @for link in self.links
                            {
                                (link.into_html())
                            }

                            @if let Some(email) = self.identity
                            {
                                li class="py-2 px-3 lg:p-0 text-sm self-center text-gray-500 dark:text-gray-400"
                                {
                                    (email)
                                }
                            }

                            (session_link.into_html())
                        }
                    }
                }
            }
        }
    }
}
